use htmlescape::{encode_attribute, encode_minimal};

use crate::application::ports::user_repository::UserRow;
use crate::application::services::avatar;
use crate::application::services::markdown;
use crate::domain::blog::comment::Comment;
use crate::domain::blog::post::{Post, PostSummary};
use crate::presentation::http::flash::Flash;

const SITE_NAME: &str = "Pressmark";

fn format_date(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%b %d, %Y").to_string()
}

fn nav(user: Option<&UserRow>) -> String {
    let account = match user {
        Some(u) => format!(
            "<span class=\"nav-user\">{}</span><a href=\"/logout\">Log Out</a>",
            encode_minimal(&u.name)
        ),
        None => "<a href=\"/login\">Log In</a><a href=\"/register\">Register</a>".to_string(),
    };
    format!(
        "<nav class=\"topnav\"><a class=\"brand\" href=\"/\">{}</a><div class=\"links\"><a href=\"/\">Home</a><a href=\"/about\">About</a><a href=\"/contact\">Contact</a>{}</div></nav>",
        SITE_NAME, account
    )
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(f) => format!(
            "<div class=\"flash flash-{}\">{}</div>",
            f.level.as_str(),
            encode_minimal(&f.message)
        ),
        None => String::new(),
    }
}

fn layout(title: &str, user: Option<&UserRow>, flash: Option<&Flash>, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n<title>{title} • {site}</title>\n<link rel=\"stylesheet\" href=\"/static/styles.css\" />\n</head>\n<body>\n{nav}\n{flash}\n<main class=\"container\">\n{body}\n</main>\n<footer class=\"footer\"><p>{site}</p></footer>\n</body>\n</html>\n",
        title = encode_minimal(title),
        site = SITE_NAME,
        nav = nav(user),
        flash = flash_banner(flash),
        body = body,
    )
}

pub fn index_page(
    posts: &[PostSummary],
    user: Option<&UserRow>,
    is_admin: bool,
    flash: Option<&Flash>,
) -> String {
    let mut body = String::from("<h1>Latest Posts</h1>\n");
    if is_admin {
        body.push_str("<p><a class=\"button\" href=\"/new-post\">New Post</a></p>\n");
    }
    if posts.is_empty() {
        body.push_str("<p class=\"empty\">Nothing has been published yet.</p>\n");
    }
    for p in posts {
        let admin_links = if is_admin {
            format!(
                "<span class=\"admin-links\"><a href=\"/edit-post/{id}\">Edit</a> <a href=\"/delete-post/{id}\">Delete</a></span>",
                id = p.id
            )
        } else {
            String::new()
        };
        body.push_str(&format!(
            "<article class=\"post-card\"><a href=\"/post/{id}\"><h2>{title}</h2></a><h3>{subtitle}</h3><p class=\"meta\">by {author} on {date}{admin}</p></article>\n",
            id = p.id,
            title = encode_minimal(&p.title),
            subtitle = encode_minimal(&p.subtitle),
            author = encode_minimal(&p.author_name),
            date = format_date(&p.created_at),
            admin = admin_links,
        ));
    }
    layout("Home", user, flash, &body)
}

pub fn post_page(
    post: &Post,
    comments: &[Comment],
    user: Option<&UserRow>,
    is_admin: bool,
    flash: Option<&Flash>,
) -> String {
    let body_html = markdown::render_markdown(&post.body);
    let mut body = format!(
        "<article class=\"post\"><img class=\"post-image\" src=\"{img}\" alt=\"\" /><h1>{title}</h1><h2 class=\"subtitle\">{subtitle}</h2><p class=\"meta\">by {author} on {date}</p><div class=\"post-body\">{body}</div></article>\n",
        img = encode_attribute(&post.image_url),
        title = encode_minimal(&post.title),
        subtitle = encode_minimal(&post.subtitle),
        author = encode_minimal(&post.author_name),
        date = format_date(&post.created_at),
        body = body_html,
    );
    if is_admin {
        body.push_str(&format!(
            "<p class=\"admin-links\"><a href=\"/edit-post/{id}\">Edit Post</a> <a href=\"/delete-post/{id}\">Delete Post</a></p>\n",
            id = post.id
        ));
    }
    body.push_str("<section class=\"comments\"><h2>Comments</h2>\n");
    if comments.is_empty() {
        body.push_str("<p class=\"empty\">No comments yet.</p>\n");
    }
    for c in comments {
        body.push_str(&format!(
            "<div class=\"comment\"><img class=\"avatar\" src=\"{avatar}\" alt=\"\" /><div><p class=\"meta\">{author} on {date}</p><div class=\"comment-body\">{body}</div></div></div>\n",
            avatar = encode_attribute(&avatar::avatar_url(&c.author_email)),
            author = encode_minimal(&c.author_name),
            date = format_date(&c.created_at),
            body = markdown::render_markdown(&c.body),
        ));
    }
    if user.is_some() {
        body.push_str(&format!(
            "<form method=\"post\" action=\"/post/{id}\"><label for=\"body\">Comment</label><textarea id=\"body\" name=\"body\" rows=\"4\" required></textarea><button type=\"submit\">Submit Comment</button></form>\n",
            id = post.id
        ));
    } else {
        body.push_str("<p><a href=\"/login\">Log in</a> to leave a comment.</p>\n");
    }
    body.push_str("</section>\n");
    layout(&post.title, user, flash, &body)
}

pub fn register_page(user: Option<&UserRow>, flash: Option<&Flash>) -> String {
    let body = "<h1>Register</h1>\n<form method=\"post\" action=\"/register\"><label for=\"name\">Name</label><input id=\"name\" name=\"name\" type=\"text\" required /><label for=\"email\">Email</label><input id=\"email\" name=\"email\" type=\"email\" required /><label for=\"password\">Password</label><input id=\"password\" name=\"password\" type=\"password\" required /><button type=\"submit\">Sign Me Up</button></form>\n";
    layout("Register", user, flash, body)
}

pub fn login_page(user: Option<&UserRow>, flash: Option<&Flash>) -> String {
    let body = "<h1>Log In</h1>\n<form method=\"post\" action=\"/login\"><label for=\"email\">Email</label><input id=\"email\" name=\"email\" type=\"email\" required /><label for=\"password\">Password</label><input id=\"password\" name=\"password\" type=\"password\" required /><button type=\"submit\">Let Me In</button></form>\n";
    layout("Log In", user, flash, body)
}

/// Shared by the create and edit forms; `existing` pre-fills the fields
/// and switches the action to the edit route.
pub fn post_form_page(
    existing: Option<&Post>,
    user: Option<&UserRow>,
    flash: Option<&Flash>,
) -> String {
    let (heading, action) = match existing {
        Some(p) => ("Edit Post".to_string(), format!("/edit-post/{}", p.id)),
        None => ("New Post".to_string(), "/new-post".to_string()),
    };
    let title = existing.map(|p| p.title.as_str()).unwrap_or("");
    let subtitle = existing.map(|p| p.subtitle.as_str()).unwrap_or("");
    let image_url = existing.map(|p| p.image_url.as_str()).unwrap_or("");
    let post_body = existing.map(|p| p.body.as_str()).unwrap_or("");
    let body = format!(
        "<h1>{heading}</h1>\n<form method=\"post\" action=\"{action}\"><label for=\"title\">Title</label><input id=\"title\" name=\"title\" type=\"text\" value=\"{title}\" required /><label for=\"subtitle\">Subtitle</label><input id=\"subtitle\" name=\"subtitle\" type=\"text\" value=\"{subtitle}\" required /><label for=\"image_url\">Image URL</label><input id=\"image_url\" name=\"image_url\" type=\"url\" value=\"{image_url}\" required /><label for=\"body\">Content (Markdown)</label><textarea id=\"body\" name=\"body\" rows=\"12\" required>{post_body}</textarea><button type=\"submit\">Submit Post</button></form>\n",
        heading = encode_minimal(&heading),
        action = action,
        title = encode_attribute(title),
        subtitle = encode_attribute(subtitle),
        image_url = encode_attribute(image_url),
        post_body = encode_minimal(post_body),
    );
    layout(&heading, user, flash, &body)
}

pub fn about_page(user: Option<&UserRow>, flash: Option<&Flash>) -> String {
    let body = "<h1>About</h1>\n<p>A small writing corner. Posts are written by the site owner; readers are welcome to sign up and join the conversation in the comments.</p>\n";
    layout("About", user, flash, body)
}

pub fn contact_page(user: Option<&UserRow>, flash: Option<&Flash>, sent: bool) -> String {
    let mut body = String::from("<h1>Contact</h1>\n");
    if sent {
        body.push_str("<p class=\"confirmation\">Your message has been sent. Thank you!</p>\n");
    } else {
        body.push_str(
            "<form method=\"post\" action=\"/contact\"><label for=\"name\">Name</label><input id=\"name\" name=\"name\" type=\"text\" required /><label for=\"email\">Email</label><input id=\"email\" name=\"email\" type=\"email\" required /><label for=\"phone\">Phone</label><input id=\"phone\" name=\"phone\" type=\"text\" /><label for=\"message\">Message</label><textarea id=\"message\" name=\"message\" rows=\"6\" required></textarea><button type=\"submit\">Send</button></form>\n",
        );
    }
    layout("Contact", user, flash, &body)
}
