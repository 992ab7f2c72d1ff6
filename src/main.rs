use std::sync::Arc;

use blog_client::BlogApiClient;
use gui::{Action, App, Message};
use iced::{Application, Command, Settings};
use masterblog_core::{CoreError, ErrorExt};
use preferences::{PreferenceStore, Preferences};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("masterblog=debug,blog_client=debug,gui=debug")
        .init();

    tracing::info!("Starting Masterblog desktop client");

    let store = PreferenceStore::from_default_dir()
        .map_err(|e| anyhow::anyhow!("resolving preference location: {e}"))?;
    let preferences = match store.load() {
        Ok(preferences) => preferences,
        Err(e) => {
            // A broken preference file only costs the saved base URL.
            e.log_warn();
            Preferences::default()
        }
    };

    let client = Arc::new(BlogApiClient::new(format!(
        "masterblog/{}",
        env!("CARGO_PKG_VERSION")
    )));

    let flags = AppFlags {
        client: client.clone(),
        store,
        initial_base_url: preferences.api_base_url,
    };

    let settings = Settings {
        window: iced::window::Settings {
            size: iced::Size::new(1200.0, 800.0),
            min_size: Some(iced::Size::new(800.0, 600.0)),
            ..Default::default()
        },
        ..Settings::with_flags(flags)
    };

    MasterblogApp::run(settings).map_err(|e| anyhow::anyhow!("application error: {e}"))?;

    let metrics = client.get_metrics().await;
    tracing::info!(
        "Session issued {} requests ({} ok, {} failed)",
        metrics.total_requests,
        metrics.successful_requests,
        metrics.failed_requests
    );

    Ok(())
}

struct AppFlags {
    client: Arc<BlogApiClient>,
    store: PreferenceStore,
    initial_base_url: Option<String>,
}

struct MasterblogApp {
    app: App,
    client: Arc<BlogApiClient>,
    store: PreferenceStore,
}

impl Application for MasterblogApp {
    type Message = Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = AppFlags;

    fn new(flags: AppFlags) -> (Self, Command<Message>) {
        tracing::info!("Initializing application");

        let initial_base_url = flags.initial_base_url.clone();
        let shell = Self {
            app: App::new(flags.initial_base_url),
            client: flags.client,
            store: flags.store,
        };

        // Startup load only happens when a base URL was saved previously.
        let command = match initial_base_url {
            Some(base_url) => shell.perform(Action::LoadPosts { base_url }),
            None => Command::none(),
        };

        (shell, command)
    }

    fn title(&self) -> String {
        "Masterblog".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match self.app.update(message) {
            Some(action) => self.perform(action),
            None => Command::none(),
        }
    }

    fn view(&self) -> iced::Element<Message> {
        self.app.view()
    }
}

impl MasterblogApp {
    /// Maps a controller action onto an API call. Failures are logged here
    /// and handed back to the controller as plain strings; nothing is shown
    /// to the user.
    fn perform(&self, action: Action) -> Command<Message> {
        let client = self.client.clone();

        match action {
            Action::LoadPosts { base_url } => {
                // The base URL preference is written on every load, and
                // only on loads.
                let preferences = Preferences {
                    api_base_url: Some(base_url.clone()),
                };
                if let Err(e) = self.store.save(&preferences) {
                    e.log_warn();
                }

                Command::perform(
                    async move { client.list_posts(&base_url).await.map_err(log_and_stringify) },
                    Message::PostsLoaded,
                )
            }
            Action::Search { base_url, query } => Command::perform(
                async move {
                    client
                        .search_posts(&base_url, &query)
                        .await
                        .map_err(log_and_stringify)
                },
                Message::SearchFinished,
            ),
            Action::CreatePost { base_url, post } => Command::perform(
                async move {
                    client
                        .create_post(&base_url, &post)
                        .await
                        .map_err(log_and_stringify)
                },
                Message::PostSaved,
            ),
            Action::UpdatePost { base_url, id, post } => Command::perform(
                async move {
                    client
                        .update_post(&base_url, id, &post)
                        .await
                        .map_err(log_and_stringify)
                },
                Message::PostSaved,
            ),
            Action::AddComment {
                base_url,
                id,
                comment,
            } => Command::perform(
                async move {
                    client
                        .add_comment(&base_url, id, &comment)
                        .await
                        .map_err(log_and_stringify)
                },
                Message::CommentAdded,
            ),
            Action::LikePost { base_url, id } => Command::perform(
                async move {
                    client
                        .like_post(&base_url, id)
                        .await
                        .map_err(log_and_stringify)
                },
                Message::PostLiked,
            ),
            Action::DeletePost { base_url, id } => Command::perform(
                async move {
                    client
                        .delete_post(&base_url, id)
                        .await
                        .map_err(log_and_stringify)
                },
                Message::PostDeleted,
            ),
        }
    }
}

fn log_and_stringify(error: CoreError) -> String {
    error.log_error();
    error.to_string()
}
