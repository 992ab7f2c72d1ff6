use std::collections::HashMap;

use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{Element, Length, Theme};
use masterblog_core::{NewPost, Post, SearchQuery};

/// Side effect requested by the controller. The binary maps these onto API
/// calls and feeds the outcome back in as a completion [`Message`]. Every
/// action carries the base URL as it read from the field at press time.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadPosts {
        base_url: String,
    },
    Search {
        base_url: String,
        query: SearchQuery,
    },
    CreatePost {
        base_url: String,
        post: NewPost,
    },
    UpdatePost {
        base_url: String,
        id: u64,
        post: NewPost,
    },
    AddComment {
        base_url: String,
        id: u64,
        comment: String,
    },
    LikePost {
        base_url: String,
        id: u64,
    },
    DeletePost {
        base_url: String,
        id: u64,
    },
}

#[derive(Debug, Clone)]
pub enum Message {
    // Input edits
    ApiBaseUrlChanged(String),
    TitleChanged(String),
    AuthorChanged(String),
    DateChanged(String),
    ContentChanged(String),
    SearchTitleChanged(String),
    SortFieldChanged(String),
    SortDirectionChanged(String),
    CommentDraftChanged(u64, String),

    // Button presses
    LoadPressed,
    SearchPressed,
    SubmitPostPressed,
    EditPressed(u64),
    CancelEditPressed,
    AddCommentPressed(u64),
    LikePressed(u64),
    DeletePressed(u64),

    // Completions, reported by the binary once the API call resolves
    PostsLoaded(Result<Vec<Post>, String>),
    SearchFinished(Result<Vec<Post>, String>),
    PostSaved(Result<(), String>),
    CommentAdded(Result<(), String>),
    PostLiked(Result<(), String>),
    PostDeleted(Result<(), String>),
}

/// View controller state. Holds the rendered post snapshot and the raw
/// contents of every input field; all I/O lives outside this crate.
pub struct App {
    api_base_url: String,
    posts: Vec<Post>,

    title_input: String,
    author_input: String,
    date_input: String,
    content_input: String,
    editing_post: Option<u64>,

    search_title: String,
    sort_field: String,
    sort_direction: String,

    comment_drafts: HashMap<u64, String>,
}

impl App {
    pub fn new(initial_base_url: Option<String>) -> Self {
        Self {
            api_base_url: initial_base_url.unwrap_or_default(),
            posts: Vec::new(),
            title_input: String::new(),
            author_input: String::new(),
            date_input: today(),
            content_input: String::new(),
            editing_post: None,
            search_title: String::new(),
            sort_field: String::new(),
            sort_direction: String::new(),
            comment_drafts: HashMap::new(),
        }
    }

    /// Applies a message and returns the side effect to run, if any.
    ///
    /// The consistency rules live here: a successful mutation always asks
    /// for a full reload, a failed one asks for nothing, and a failed load
    /// leaves the previous snapshot in place.
    pub fn update(&mut self, message: Message) -> Option<Action> {
        match message {
            Message::ApiBaseUrlChanged(value) => {
                self.api_base_url = value;
                None
            }
            Message::TitleChanged(value) => {
                self.title_input = value;
                None
            }
            Message::AuthorChanged(value) => {
                self.author_input = value;
                None
            }
            Message::DateChanged(value) => {
                self.date_input = value;
                None
            }
            Message::ContentChanged(value) => {
                self.content_input = value;
                None
            }
            Message::SearchTitleChanged(value) => {
                self.search_title = value;
                None
            }
            Message::SortFieldChanged(value) => {
                self.sort_field = value;
                None
            }
            Message::SortDirectionChanged(value) => {
                self.sort_direction = value;
                None
            }
            Message::CommentDraftChanged(id, value) => {
                self.comment_drafts.insert(id, value);
                None
            }

            Message::LoadPressed => Some(self.load_action()),
            Message::SearchPressed => Some(Action::Search {
                base_url: self.api_base_url.clone(),
                query: SearchQuery {
                    title: self.search_title.clone(),
                    sort: self.sort_field.clone(),
                    direction: self.sort_direction.clone(),
                },
            }),
            Message::SubmitPostPressed => {
                let post = NewPost {
                    title: self.title_input.clone(),
                    author: self.author_input.clone(),
                    date: self.date_input.clone(),
                    content: self.content_input.clone(),
                };
                match self.editing_post {
                    Some(id) => Some(Action::UpdatePost {
                        base_url: self.api_base_url.clone(),
                        id,
                        post,
                    }),
                    None => Some(Action::CreatePost {
                        base_url: self.api_base_url.clone(),
                        post,
                    }),
                }
            }
            Message::EditPressed(id) => {
                if let Some(post) = self.posts.iter().find(|post| post.id == id) {
                    self.title_input = post.title.clone();
                    self.author_input = post.author.clone();
                    self.date_input = post.date.clone();
                    self.content_input = post.content.clone();
                    self.editing_post = Some(id);
                }
                None
            }
            Message::CancelEditPressed => {
                self.reset_compose_form();
                None
            }
            Message::AddCommentPressed(id) => {
                let comment = self.comment_drafts.get(&id).cloned().unwrap_or_default();
                Some(Action::AddComment {
                    base_url: self.api_base_url.clone(),
                    id,
                    comment,
                })
            }
            Message::LikePressed(id) => Some(Action::LikePost {
                base_url: self.api_base_url.clone(),
                id,
            }),
            Message::DeletePressed(id) => Some(Action::DeletePost {
                base_url: self.api_base_url.clone(),
                id,
            }),

            Message::PostsLoaded(Ok(posts)) | Message::SearchFinished(Ok(posts)) => {
                // Full re-render: the comment inputs of the previous view
                // are replaced along with it.
                self.posts = posts;
                self.comment_drafts.clear();
                None
            }
            Message::PostsLoaded(Err(_)) | Message::SearchFinished(Err(_)) => {
                // Already logged at the request boundary; the previous
                // snapshot stays on screen.
                None
            }

            Message::PostSaved(Ok(())) => {
                if self.editing_post.take().is_some() {
                    self.reset_compose_form();
                }
                Some(self.load_action())
            }
            Message::CommentAdded(Ok(()))
            | Message::PostLiked(Ok(()))
            | Message::PostDeleted(Ok(())) => Some(self.load_action()),

            Message::PostSaved(Err(_))
            | Message::CommentAdded(Err(_))
            | Message::PostLiked(Err(_))
            | Message::PostDeleted(Err(_)) => None,
        }
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let url_bar: Element<Message, Theme> = row![
            text_input("API base URL", &self.api_base_url).on_input(Message::ApiBaseUrlChanged),
            button("Load Posts").on_press(Message::LoadPressed),
        ]
        .spacing(10)
        .into();

        let heading = if self.editing_post.is_some() {
            "Edit Post"
        } else {
            "New Post"
        };
        let submit_label = if self.editing_post.is_some() {
            "Update Post"
        } else {
            "Add Post"
        };
        let mut form_buttons = row![button(submit_label).on_press(Message::SubmitPostPressed)]
            .spacing(10);
        if self.editing_post.is_some() {
            form_buttons = form_buttons.push(button("Cancel").on_press(Message::CancelEditPressed));
        }
        let compose: Element<Message, Theme> = column![
            text(heading).size(18),
            text_input("Title", &self.title_input).on_input(Message::TitleChanged),
            text_input("Author", &self.author_input).on_input(Message::AuthorChanged),
            text_input("Date (YYYY-MM-DD)", &self.date_input).on_input(Message::DateChanged),
            text_input("Content", &self.content_input).on_input(Message::ContentChanged),
            form_buttons,
        ]
        .spacing(5)
        .into();

        let search_bar: Element<Message, Theme> = row![
            text_input("Search title", &self.search_title).on_input(Message::SearchTitleChanged),
            text_input("Sort field", &self.sort_field).on_input(Message::SortFieldChanged),
            text_input("Direction", &self.sort_direction).on_input(Message::SortDirectionChanged),
            button("Search").on_press(Message::SearchPressed),
        ]
        .spacing(10)
        .into();

        let posts_view: Element<Message, Theme> = if self.posts.is_empty() {
            column![
                text("No posts to show").size(16),
                text("Set the API base URL and load posts").size(14)
            ]
            .spacing(10)
            .into()
        } else {
            let mut post_list = Column::new().spacing(10);
            for post in &self.posts {
                post_list = post_list.push(self.post_block(post));
            }
            scrollable(post_list).height(Length::Fill).into()
        };

        let main_content: Element<Message, Theme> =
            column![url_bar, compose, search_bar, posts_view]
                .spacing(20)
                .into();

        container(main_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }

    fn post_block(&self, post: &Post) -> Element<Message, Theme> {
        let id = post.id;
        let draft = self
            .comment_drafts
            .get(&id)
            .map(String::as_str)
            .unwrap_or("");

        let mut comments = Column::new().spacing(2);
        for comment in &post.comments {
            comments = comments.push(text(comment).size(12));
        }

        container(
            column![
                text(&post.title).size(16),
                text(format!("Author: {}", post.author)).size(12),
                text(format!("Date: {}", post.date)).size(12),
                text(&post.content).size(14),
                text(format!("Likes: {}", post.likes)).size(12),
                row![
                    button("Like").on_press(Message::LikePressed(id)),
                    button("Edit").on_press(Message::EditPressed(id)),
                    button("Delete").on_press(Message::DeletePressed(id)),
                ]
                .spacing(10),
                text("Comments:").size(12),
                comments,
                row![
                    text_input("Add a comment", draft)
                        .on_input(move |value| Message::CommentDraftChanged(id, value)),
                    button("Add Comment").on_press(Message::AddCommentPressed(id)),
                ]
                .spacing(10),
            ]
            .spacing(5),
        )
        .padding(10)
        .into()
    }

    fn load_action(&self) -> Action {
        Action::LoadPosts {
            base_url: self.api_base_url.clone(),
        }
    }

    fn reset_compose_form(&mut self) {
        self.editing_post = None;
        self.title_input.clear();
        self.author_input.clear();
        self.date_input = today();
        self.content_input.clear();
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(id: u64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            author: "B".to_string(),
            date: "2024-01-01".to_string(),
            content: "C".to_string(),
            likes: 2,
            comments: vec!["hi".to_string()],
        }
    }

    fn loaded_app(posts: Vec<Post>) -> App {
        let mut app = App::new(Some("http://localhost:5002/api".to_string()));
        let action = app.update(Message::PostsLoaded(Ok(posts)));
        assert_eq!(action, None);
        app
    }

    #[test]
    fn test_load_pressed_uses_current_base_url() {
        let mut app = App::new(None);
        app.update(Message::ApiBaseUrlChanged(
            "http://localhost:5002/api".to_string(),
        ));

        let action = app.update(Message::LoadPressed);
        assert_eq!(
            action,
            Some(Action::LoadPosts {
                base_url: "http://localhost:5002/api".to_string()
            })
        );
    }

    #[test]
    fn test_base_url_is_read_fresh_per_action() {
        let mut app = loaded_app(vec![sample_post(1, "A")]);

        app.update(Message::ApiBaseUrlChanged("http://first/api".to_string()));
        let first = app.update(Message::LikePressed(1));
        app.update(Message::ApiBaseUrlChanged("http://second/api".to_string()));
        let second = app.update(Message::LikePressed(1));

        assert_eq!(
            first,
            Some(Action::LikePost {
                base_url: "http://first/api".to_string(),
                id: 1
            })
        );
        assert_eq!(
            second,
            Some(Action::LikePost {
                base_url: "http://second/api".to_string(),
                id: 1
            })
        );
    }

    #[test]
    fn test_posts_loaded_replaces_snapshot() {
        let mut app = loaded_app(vec![sample_post(1, "A"), sample_post(2, "B")]);
        assert_eq!(app.posts.len(), 2);

        app.update(Message::PostsLoaded(Ok(vec![sample_post(3, "C")])));
        assert_eq!(app.posts.len(), 1);
        assert_eq!(app.posts[0].title, "C");
    }

    #[test]
    fn test_failed_load_keeps_previous_snapshot() {
        let mut app = loaded_app(vec![sample_post(1, "A")]);

        let action = app.update(Message::PostsLoaded(Err("boom".to_string())));
        assert_eq!(action, None);
        assert_eq!(app.posts.len(), 1);
        assert_eq!(app.posts[0].title, "A");
    }

    #[test]
    fn test_search_pressed_carries_query_fields() {
        let mut app = App::new(Some("http://localhost:5002/api".to_string()));
        app.update(Message::SearchTitleChanged("flask &co".to_string()));
        app.update(Message::SortFieldChanged("title".to_string()));
        app.update(Message::SortDirectionChanged("desc".to_string()));

        let action = app.update(Message::SearchPressed);
        assert_eq!(
            action,
            Some(Action::Search {
                base_url: "http://localhost:5002/api".to_string(),
                query: SearchQuery {
                    title: "flask &co".to_string(),
                    sort: "title".to_string(),
                    direction: "desc".to_string(),
                },
            })
        );
    }

    #[test]
    fn test_search_results_render_like_a_load() {
        let mut app = loaded_app(vec![sample_post(1, "A")]);
        app.update(Message::CommentDraftChanged(1, "draft".to_string()));

        app.update(Message::SearchFinished(Ok(vec![sample_post(9, "Found")])));
        assert_eq!(app.posts.len(), 1);
        assert_eq!(app.posts[0].id, 9);
        assert!(app.comment_drafts.is_empty());
    }

    #[test]
    fn test_successful_render_clears_comment_drafts() {
        let mut app = loaded_app(vec![sample_post(1, "A")]);
        app.update(Message::CommentDraftChanged(1, "half-typed".to_string()));

        app.update(Message::PostsLoaded(Ok(vec![sample_post(1, "A")])));
        assert!(app.comment_drafts.is_empty());
    }

    #[test]
    fn test_submit_creates_post_from_form_fields() {
        let mut app = App::new(Some("http://localhost:5002/api".to_string()));
        app.update(Message::TitleChanged("  spaced  ".to_string()));
        app.update(Message::AuthorChanged("me".to_string()));
        app.update(Message::DateChanged("2024-02-02".to_string()));
        app.update(Message::ContentChanged("body".to_string()));

        let action = app.update(Message::SubmitPostPressed);
        assert_eq!(
            action,
            Some(Action::CreatePost {
                base_url: "http://localhost:5002/api".to_string(),
                post: NewPost {
                    // Verbatim, untrimmed
                    title: "  spaced  ".to_string(),
                    author: "me".to_string(),
                    date: "2024-02-02".to_string(),
                    content: "body".to_string(),
                },
            })
        );
    }

    #[test]
    fn test_mutation_success_triggers_exactly_one_reload() {
        let mut app = loaded_app(vec![sample_post(1, "A")]);
        let reload = Some(Action::LoadPosts {
            base_url: "http://localhost:5002/api".to_string(),
        });

        assert_eq!(app.update(Message::PostSaved(Ok(()))), reload);
        assert_eq!(app.update(Message::CommentAdded(Ok(()))), reload);
        assert_eq!(app.update(Message::PostLiked(Ok(()))), reload);
        assert_eq!(app.update(Message::PostDeleted(Ok(()))), reload);
    }

    #[test]
    fn test_mutation_failure_does_not_reload() {
        let mut app = loaded_app(vec![sample_post(1, "A")]);

        assert_eq!(app.update(Message::PostSaved(Err("500".to_string()))), None);
        assert_eq!(
            app.update(Message::CommentAdded(Err("refused".to_string()))),
            None
        );
        assert_eq!(
            app.update(Message::PostLiked(Err("refused".to_string()))),
            None
        );
        assert_eq!(
            app.update(Message::PostDeleted(Err("refused".to_string()))),
            None
        );
    }

    #[test]
    fn test_add_comment_uses_the_draft_for_that_post() {
        let mut app = loaded_app(vec![sample_post(1, "A"), sample_post(2, "B")]);
        app.update(Message::CommentDraftChanged(2, "nice one".to_string()));

        let action = app.update(Message::AddCommentPressed(2));
        assert_eq!(
            action,
            Some(Action::AddComment {
                base_url: "http://localhost:5002/api".to_string(),
                id: 2,
                comment: "nice one".to_string(),
            })
        );

        // A post without a draft submits an empty comment.
        let action = app.update(Message::AddCommentPressed(1));
        assert_eq!(
            action,
            Some(Action::AddComment {
                base_url: "http://localhost:5002/api".to_string(),
                id: 1,
                comment: String::new(),
            })
        );
    }

    #[test]
    fn test_delete_pressed_targets_the_post() {
        let mut app = loaded_app(vec![sample_post(7, "A")]);

        let action = app.update(Message::DeletePressed(7));
        assert_eq!(
            action,
            Some(Action::DeletePost {
                base_url: "http://localhost:5002/api".to_string(),
                id: 7,
            })
        );
    }

    #[test]
    fn test_edit_populates_form_and_submits_an_update() {
        let mut app = loaded_app(vec![sample_post(4, "Original title")]);

        app.update(Message::EditPressed(4));
        assert_eq!(app.editing_post, Some(4));
        assert_eq!(app.title_input, "Original title");
        assert_eq!(app.date_input, "2024-01-01");

        app.update(Message::TitleChanged("Revised title".to_string()));
        let action = app.update(Message::SubmitPostPressed);
        assert_eq!(
            action,
            Some(Action::UpdatePost {
                base_url: "http://localhost:5002/api".to_string(),
                id: 4,
                post: NewPost {
                    title: "Revised title".to_string(),
                    author: "B".to_string(),
                    date: "2024-01-01".to_string(),
                    content: "C".to_string(),
                },
            })
        );

        // A successful save leaves edit mode; the next submit creates.
        app.update(Message::PostSaved(Ok(())));
        assert_eq!(app.editing_post, None);
        let action = app.update(Message::SubmitPostPressed);
        assert!(matches!(action, Some(Action::CreatePost { .. })));
    }

    #[test]
    fn test_edit_unknown_post_is_ignored() {
        let mut app = loaded_app(vec![sample_post(1, "A")]);

        app.update(Message::EditPressed(99));
        assert_eq!(app.editing_post, None);
        assert!(app.title_input.is_empty());
    }

    #[test]
    fn test_cancel_edit_resets_the_form() {
        let mut app = loaded_app(vec![sample_post(4, "Original title")]);

        app.update(Message::EditPressed(4));
        app.update(Message::CancelEditPressed);

        assert_eq!(app.editing_post, None);
        assert!(app.title_input.is_empty());
        assert!(app.content_input.is_empty());

        let action = app.update(Message::SubmitPostPressed);
        assert!(matches!(action, Some(Action::CreatePost { .. })));
    }
}
