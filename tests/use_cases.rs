use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use pressmark::application::access::{self, Actor, Capability};
use pressmark::application::ports::comment_repository::CommentRepository;
use pressmark::application::ports::mailer::{Mailer, OutboundEmail};
use pressmark::application::ports::post_repository::PostRepository;
use pressmark::application::ports::user_repository::{UserRepository, UserRow};
use pressmark::application::use_cases::auth::login::{Login, LoginOutcome, LoginRequest};
use pressmark::application::use_cases::auth::register::{
    Register, RegisterOutcome, RegisterRequest,
};
use pressmark::application::use_cases::comments::add_comment::AddComment;
use pressmark::application::use_cases::comments::list_comments::ListComments;
use pressmark::application::use_cases::contact::send_contact_message::{
    ContactMessage, SendContactMessage,
};
use pressmark::application::use_cases::posts::create_post::{
    CreatePost, CreatePostOutcome, NewPost,
};
use pressmark::application::use_cases::posts::update_post::{UpdatePost, UpdatePostOutcome};
use pressmark::domain::blog::comment::Comment;
use pressmark::domain::blog::post::{Post, PostSummary};

#[derive(Default)]
struct InMemoryUsers {
    rows: Mutex<Vec<UserRow>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<UserRow> {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: Some(password_hash.to_string()),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .map(|r| UserRow {
                password_hash: None,
                ..r.clone()
            }))
    }

    async fn first_user_id(&self) -> anyhow::Result<Option<Uuid>> {
        Ok(self.rows.lock().unwrap().first().map(|r| r.id))
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
struct InMemoryPosts {
    rows: Mutex<Vec<Post>>,
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn create(
        &self,
        author_id: Uuid,
        title: &str,
        subtitle: &str,
        body: &str,
        image_url: &str,
    ) -> anyhow::Result<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            author_name: "Author".into(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            body: body.to_string(),
            image_url: image_url.to_string(),
            created_at: chrono::Utc::now(),
        };
        self.rows.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<PostSummary>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|p| PostSummary {
                id: p.id,
                author_name: p.author_name.clone(),
                title: p.title.clone(),
                subtitle: p.subtitle.clone(),
                created_at: p.created_at,
            })
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_id_by_title(&self, title: &str) -> anyhow::Result<Option<Uuid>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.title == title)
            .map(|p| p.id))
    }

    async fn update(
        &self,
        id: Uuid,
        title: &str,
        subtitle: &str,
        body: &str,
        image_url: &str,
    ) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.title = title.to_string();
                p.subtitle = subtitle.to_string();
                p.body = body.to_string();
                p.image_url = image_url.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
struct InMemoryComments {
    rows: Mutex<Vec<Comment>>,
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn create(&self, post_id: Uuid, author_id: Uuid, body: &str) -> anyhow::Result<Uuid> {
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            author_name: "Reader".into(),
            author_email: "reader@example.com".into(),
            body: body.to_string(),
            created_at: chrono::Utc::now(),
        };
        let id = comment.id;
        self.rows.lock().unwrap().push(comment);
        Ok(id)
    }

    async fn list_for_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutboundEmail) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

fn register_req(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.into(),
        name: "Someone".into(),
        password: "hunter2hunter2".into(),
    }
}

fn new_post(title: &str) -> NewPost {
    NewPost {
        title: title.into(),
        subtitle: "sub".into(),
        body: "body".into(),
        image_url: "https://example.com/i.jpg".into(),
    }
}

#[tokio::test]
async fn registering_the_same_email_twice_is_rejected() {
    let users = InMemoryUsers::default();
    let uc = Register { repo: &users };

    let first = uc.execute(&register_req("a@example.com")).await.unwrap();
    assert!(matches!(first, RegisterOutcome::Created(_)));

    let second = uc.execute(&register_req("a@example.com")).await.unwrap();
    assert!(matches!(second, RegisterOutcome::EmailTaken));
}

#[tokio::test]
async fn passwords_are_stored_hashed() {
    let users = InMemoryUsers::default();
    let uc = Register { repo: &users };
    uc.execute(&register_req("a@example.com")).await.unwrap();

    let stored = users.find_by_email("a@example.com").await.unwrap().unwrap();
    let hash = stored.password_hash.unwrap();
    assert_ne!(hash, "hunter2hunter2");
    assert!(hash.starts_with("$argon2"));
}

#[tokio::test]
async fn login_verifies_the_password() {
    let users = InMemoryUsers::default();
    let register = Register { repo: &users };
    register.execute(&register_req("a@example.com")).await.unwrap();

    let login = Login { repo: &users };
    let ok = login
        .execute(&LoginRequest {
            email: "a@example.com".into(),
            password: "hunter2hunter2".into(),
        })
        .await
        .unwrap();
    match ok {
        LoginOutcome::Authenticated(user) => {
            assert_eq!(user.email, "a@example.com");
            // The hash never leaves the login path
            assert!(user.password_hash.is_none());
        }
        other => panic!("expected Authenticated, got {:?}", other),
    }

    let wrong = login
        .execute(&LoginRequest {
            email: "a@example.com".into(),
            password: "not-the-password".into(),
        })
        .await
        .unwrap();
    assert!(matches!(wrong, LoginOutcome::WrongPassword));

    let unknown = login
        .execute(&LoginRequest {
            email: "nobody@example.com".into(),
            password: "hunter2hunter2".into(),
        })
        .await
        .unwrap();
    assert!(matches!(unknown, LoginOutcome::UnknownEmail));
}

#[tokio::test]
async fn only_the_first_registered_user_is_admin() {
    let users = InMemoryUsers::default();
    let uc = Register { repo: &users };
    let first = match uc.execute(&register_req("first@example.com")).await.unwrap() {
        RegisterOutcome::Created(u) => u,
        other => panic!("expected Created, got {:?}", other),
    };
    let second = match uc.execute(&register_req("second@example.com")).await.unwrap() {
        RegisterOutcome::Created(u) => u,
        other => panic!("expected Created, got {:?}", other),
    };

    assert_eq!(
        access::resolve(&users, &Actor::User(first.id)).await,
        Capability::Admin
    );
    assert_eq!(
        access::resolve(&users, &Actor::User(second.id)).await,
        Capability::Comment
    );
    assert_eq!(
        access::resolve(&users, &Actor::Anonymous).await,
        Capability::None
    );
}

#[tokio::test]
async fn post_titles_stay_unique() {
    let posts = InMemoryPosts::default();
    let author = Uuid::new_v4();
    let create = CreatePost { repo: &posts };

    let first = create.execute(author, &new_post("A Title")).await.unwrap();
    let first = match first {
        CreatePostOutcome::Created(p) => p,
        other => panic!("expected Created, got {:?}", other),
    };

    let dup = create.execute(author, &new_post("A Title")).await.unwrap();
    assert!(matches!(dup, CreatePostOutcome::TitleTaken));

    let other = create.execute(author, &new_post("Another")).await.unwrap();
    let other = match other {
        CreatePostOutcome::Created(p) => p,
        o => panic!("expected Created, got {:?}", o),
    };

    // Editing may keep the post's own title but not steal another's
    let update = UpdatePost { repo: &posts };
    let kept = update.execute(first.id, &new_post("A Title")).await.unwrap();
    assert_eq!(kept, UpdatePostOutcome::Updated);
    let stolen = update.execute(other.id, &new_post("A Title")).await.unwrap();
    assert_eq!(stolen, UpdatePostOutcome::TitleTaken);

    let missing = update
        .execute(Uuid::new_v4(), &new_post("Fresh"))
        .await
        .unwrap();
    assert_eq!(missing, UpdatePostOutcome::NotFound);
}

#[tokio::test]
async fn comments_attach_to_their_post() {
    let comments = InMemoryComments::default();
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let add = AddComment { repo: &comments };
    add.execute(post_id, author_id, "first!").await.unwrap();
    add.execute(Uuid::new_v4(), author_id, "elsewhere").await.unwrap();

    let list = ListComments { repo: &comments };
    let found = list.execute(post_id).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].body, "first!");
}

#[tokio::test]
async fn contact_messages_reach_the_configured_recipient() {
    let mailer = RecordingMailer::default();
    let uc = SendContactMessage { mailer: &mailer };
    let msg = ContactMessage {
        name: "Visitor".into(),
        email: "visitor@example.com".into(),
        phone: "555-0100".into(),
        message: "Hello there".into(),
    };
    uc.execute(&msg, "owner@example.com").await.unwrap();

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "owner@example.com");
    assert_eq!(sent[0].reply_to.as_deref(), Some("visitor@example.com"));
    assert_eq!(sent[0].subject, "New Message");
    assert!(sent[0].text_body.contains("Name: Visitor"));
    assert!(sent[0].text_body.contains("Phone: 555-0100"));
    assert!(sent[0].text_body.contains("Message: Hello there"));
}
