//! HTML pages.
//!
//! Plain `format!` templates around one shared layout; every value that
//! came from a user goes through [`html_escape`].

fn layout(title: &str, logged_in: bool, notice: Option<&str>, content: &str) -> String {
    let nav = if logged_in {
        r#"<a href="/">Home</a> <a href="/secrets">Secrets</a> <a href="/logout">Log Out</a>"#
    } else {
        r#"<a href="/">Home</a> <a href="/login">Login</a> <a href="/register">Register</a>"#
    };
    let notice = notice
        .map(|n| format!(r#"<p class="flash">{}</p>"#, html_escape(n)))
        .unwrap_or_default();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body>
    <nav>{nav}</nav>
    <main>
        {notice}
        {content}
    </main>
</body>
</html>"##,
        title = html_escape(title),
    )
}

pub fn index_page(logged_in: bool, notice: Option<&str>) -> String {
    let cta = if logged_in {
        r#"<a href="/secrets">See your secrets</a>"#
    } else {
        r#"<a href="/login">Login</a> or <a href="/register">Register</a> to see the secrets."#
    };
    layout(
        "Home",
        logged_in,
        notice,
        &format!("<h1>Welcome to the secrets site</h1>\n        <p>{cta}</p>"),
    )
}

pub fn register_page(logged_in: bool, notice: Option<&str>) -> String {
    layout(
        "Register",
        logged_in,
        notice,
        r#"<h1>Register</h1>
        <form method="POST" action="/register">
            <input type="text" name="name" placeholder="Name" required>
            <input type="email" name="email" placeholder="Email" required>
            <input type="password" name="password" placeholder="Password" required>
            <button type="submit">Sign me up.</button>
        </form>"#,
    )
}

pub fn login_page(logged_in: bool, notice: Option<&str>) -> String {
    layout(
        "Login",
        logged_in,
        notice,
        r#"<h1>Login</h1>
        <form method="POST" action="/login">
            <input type="email" name="email" placeholder="Email" required>
            <input type="password" name="password" placeholder="Password" required>
            <button type="submit">Let me in.</button>
        </form>"#,
    )
}

pub fn secrets_page(name: &str) -> String {
    layout(
        "Secrets",
        true,
        None,
        &format!(
            r#"<h1>Welcome, {name}</h1>
        <p>You've made it to the secret page.</p>
        <a href="/download">Download Your File</a>"#,
            name = html_escape(name),
        ),
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn secrets_page_escapes_name() {
        let html = secrets_page("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"href="/download""#));
    }

    #[test]
    fn nav_reflects_login_state() {
        assert!(index_page(true, None).contains("/logout"));
        assert!(!index_page(false, None).contains("/logout"));
        assert!(index_page(false, None).contains("/register"));
    }

    #[test]
    fn notice_is_rendered_escaped() {
        let html = login_page(false, Some("That's <odd>"));
        assert!(html.contains("That&#x27;s &lt;odd&gt;"));
    }
}
