//! HTML pages.
//!
//! Each page is a typed view model; rendering goes through a shared layout and
//! escapes every interpolated value.

use std::fmt::Write as _;

pub const STYLESHEET_PATH: &str = "/styles/main.css";

pub const STYLESHEET: &str = r#"body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    max-width: 480px;
    margin: 40px auto;
    padding: 0 20px;
    background: #f5f5f5;
}
.container {
    background: white;
    padding: 30px;
    border-radius: 8px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}
h1 {
    color: #333;
    border-bottom: 2px solid #0066cc;
    padding-bottom: 10px;
}
.form-group {
    margin: 15px 0;
}
label {
    display: block;
    font-weight: bold;
    margin-bottom: 5px;
}
input[type="text"],
input[type="password"] {
    width: 100%;
    padding: 10px;
    border: 1px solid #ddd;
    border-radius: 4px;
    box-sizing: border-box;
}
button {
    background: #0066cc;
    color: white;
    padding: 10px 20px;
    border: none;
    border-radius: 4px;
    cursor: pointer;
}
.errors {
    color: #d9534f;
    background: #f2dede;
    padding: 10px 10px 10px 30px;
    border-radius: 4px;
}
"#;

/// A renderable page.
pub trait Page {
    fn title(&self) -> &str;

    fn body(&self) -> String;

    fn render(&self) -> String {
        layout(self.title(), &self.body())
    }
}

/// `GET /v1/top`: login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopPage {
    pub errors: Vec<String>,
}

impl TopPage {
    #[must_use]
    pub fn with_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }
}

impl Page for TopPage {
    fn title(&self) -> &str {
        "Top Page"
    }

    fn body(&self) -> String {
        format!(
            r#"{errors}<form method="post" action="/v1/login">
    <div class="form-group">
        <label for="user_id">User ID</label>
        <input type="text" id="user_id" name="user_id" required>
    </div>
    <div class="form-group">
        <label for="password">Password</label>
        <input type="password" id="password" name="password" required>
    </div>
    <button type="submit">Log in</button>
</form>
<p><a href="/v1/create_account_page">Create an account</a></p>"#,
            errors = error_list(&self.errors),
        )
    }
}

/// `GET /v1/create_account_page`: registration form.
///
/// On a failed registration the entered `user_id` and `name` are echoed back;
/// the password never is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccountPage {
    pub errors: Vec<String>,
    pub user_id: String,
    pub name: String,
}

impl Page for CreateAccountPage {
    fn title(&self) -> &str {
        "Create Account"
    }

    fn body(&self) -> String {
        format!(
            r#"{errors}<form method="post" action="/v1/register">
    <div class="form-group">
        <label for="user_id">User ID</label>
        <input type="text" id="user_id" name="user_id" value="{user_id}">
    </div>
    <div class="form-group">
        <label for="name">Name</label>
        <input type="text" id="name" name="name" value="{name}">
    </div>
    <div class="form-group">
        <label for="password">Password</label>
        <input type="password" id="password" name="password">
    </div>
    <button type="submit">Register</button>
</form>
<p><a href="/v1/top">Back to top</a></p>"#,
            errors = error_list(&self.errors),
            user_id = html_escape(&self.user_id),
            name = html_escape(&self.name),
        )
    }
}

/// `GET /v1/mypage`: landing page behind the session gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyPage {
    pub user_id: String,
}

impl Page for MyPage {
    fn title(&self) -> &str {
        "My Page"
    }

    fn body(&self) -> String {
        format!(
            r#"<p>Logged in as <strong>{user_id}</strong></p>
<form method="post" action="/v1/logout">
    <button type="submit">Log out</button>
</form>"#,
            user_id = html_escape(&self.user_id),
        )
    }
}

/// Generic failure page; never carries internal error details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    pub message: String,
}

impl Page for ErrorPage {
    fn title(&self) -> &str {
        "Error"
    }

    fn body(&self) -> String {
        format!(
            r#"<p>{message}</p>
<p><a href="/v1/top">Back to top</a></p>"#,
            message = html_escape(&self.message),
        )
    }
}

fn layout(title: &str, body: &str) -> String {
    let title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <link rel="stylesheet" href="{STYLESHEET_PATH}">
</head>
<body>
<div class="container">
<h1>{title}</h1>
{body}
</div>
</body>
</html>
"#
    )
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ul class=\"errors\">\n");
    for error in errors {
        let _ = writeln!(html, "    <li>{}</li>", html_escape(error));
    }
    html.push_str("</ul>\n");
    html
}

/// Escape text for HTML element content and quoted attribute values.
#[must_use]
pub fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
