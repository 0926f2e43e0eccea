use actix_web::{http::header, HttpResponse};

use crate::models::SessionUser;
use crate::utils::html::escape;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} | HealthAI</title>
</head>
<body>
  <nav><a href="/">Home</a> <a href="/about">About</a> <a href="/services">Services</a> <a href="/chat">Chat</a></nav>
  <main>
{body}
  </main>
</body>
</html>"#
    )
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, location))
        .finish()
}

pub async fn home() -> HttpResponse {
    html(layout(
        "Home",
        "<h1>HealthAI</h1>\n<p>Your responsible AI health assistant.</p>\n<a href=\"/login\">Sign in</a>",
    ))
}

pub async fn about() -> HttpResponse {
    html(layout(
        "About",
        "<h1>About</h1>\n<p>HealthAI answers general health questions. It does not replace a doctor.</p>",
    ))
}

pub async fn services() -> HttpResponse {
    html(layout(
        "Services",
        "<h1>Services</h1>\n<ul><li>AI chat assistant</li><li>Feedback on every conversation</li></ul>",
    ))
}

pub async fn chat(user: Option<SessionUser>) -> HttpResponse {
    let Some(user) = user else {
        return redirect("/login");
    };

    let body = format!(
        r#"<h1>Chat</h1>
<p>Signed in as {email}. <a href="/logout">Log out</a></p>
<div id="log"></div>
<form id="chat"><input id="message" autocomplete="off"><button>Send</button></form>
<script>
document.getElementById("chat").addEventListener("submit", async (e) => {{
  e.preventDefault();
  const input = document.getElementById("message");
  const res = await fetch("/send_message", {{
    method: "POST",
    headers: {{ "Content-Type": "application/json" }},
    body: JSON.stringify({{ message: input.value }})
  }});
  const data = await res.json();
  const line = document.createElement("p");
  line.textContent = data.reply || data.error;
  document.getElementById("log").appendChild(line);
  input.value = "";
}});
</script>"#,
        email = escape(&user.email)
    );
    html(layout("Chat", &body))
}

pub async fn dashboard(user: Option<SessionUser>) -> HttpResponse {
    let Some(user) = user else {
        return redirect("/login");
    };

    let body = format!(
        "<h1>Welcome, {} {}</h1>\n<p><a href=\"/chat\">Open the chat</a> | <a href=\"/logout\">Log out</a></p>",
        escape(&user.first_name),
        escape(&user.last_name)
    );
    html(layout("Dashboard", &body))
}

/// Login page with optional login or signup error
pub fn login_page(error: Option<&str>, signup_error: Option<&str>, show_signup: bool) -> HttpResponse {
    let login_error = error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape(e)))
        .unwrap_or_default();
    let signup_error = signup_error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape(e)))
        .unwrap_or_default();
    let signup_open = if show_signup { " open" } else { "" };

    let body = format!(
        r#"<h1>Sign in</h1>
{login_error}<form method="post" action="/login">
  <input name="email" type="email" placeholder="Email" required>
  <input name="password" type="password" placeholder="Password" required>
  <button>Sign in</button>
</form>
<details{signup_open}>
<summary>Create an account</summary>
{signup_error}<form method="post" action="/signup">
  <input name="first_name" placeholder="First name" required>
  <input name="last_name" placeholder="Last name" required>
  <input name="email" type="email" placeholder="Email" required>
  <input name="password" type="password" placeholder="Password" required>
  <button>Sign up</button>
</form>
</details>"#
    );
    html(layout("Login", &body))
}

pub async fn login_form(user: Option<SessionUser>) -> HttpResponse {
    if user.is_some() {
        return redirect("/dashboard");
    }
    login_page(None, None, false)
}
