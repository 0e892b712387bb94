use crate::auth::User;
use crate::config::RoutesConfig;

use super::SIGNOUT_PATH;

const APP_NAME: &str = "AIlways";
const TAGLINE: &str = "Meeting Truth &amp; Context Copilot";

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #fafafa; color: #252525; }
main { max-width: 24rem; margin: 0 auto; padding: 6rem 1.5rem; }
h1 { font-weight: 800; }
form { display: flex; flex-direction: column; gap: 1rem; }
label { display: block; font-size: .875rem; font-weight: 500; margin-bottom: .375rem; }
input { box-sizing: border-box; width: 100%; height: 2.75rem; padding: 0 .875rem; border: 1px solid #e5e5e5; border-radius: .5rem; }
button, .button { display: inline-flex; align-items: center; justify-content: center; height: 2.75rem; padding: 0 1.25rem; border: 0; border-radius: .5rem; background: #252525; color: #fafafa; text-decoration: none; cursor: pointer; }
.error { border-radius: .5rem; background: #fef2f2; color: #dc2626; padding: .75rem 1rem; font-size: .875rem; }
.hint { font-size: .75rem; color: #a3a3a3; }
header { display: flex; justify-content: space-between; align-items: center; max-width: 64rem; margin: 0 auto; padding: 1rem 1.5rem; border-bottom: 1px solid #e5e5e5; }
"#;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {APP_NAME}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(r#"<div class="error" role="alert">{}</div>"#, escape_html(message)),
        None => String::new(),
    }
}

pub fn home(user: Option<&User>, routes: &RoutesConfig) -> String {
    let actions = match user {
        Some(_) => format!(r#"<a class="button" href="{}">Dashboard</a>"#, routes.dashboard_path),
        None => format!(
            r#"<a class="button" href="{}">Sign Up</a> <a class="button" href="{}">Sign In</a>"#,
            routes.signup_path, routes.signin_path
        ),
    };

    layout(
        "Home",
        &format!(
            r#"<main>
<h1>{APP_NAME}</h1>
<p>{TAGLINE}</p>
<nav>{actions}</nav>
</main>"#
        ),
    )
}

pub fn signin(error: Option<&str>, email: &str, routes: &RoutesConfig) -> String {
    layout(
        "Sign In",
        &format!(
            r#"<main>
<h1>Welcome back</h1>
<p>Sign in to your account</p>
<form method="post" action="{action}">
{banner}
<div><label for="email">Email</label>
<input id="email" name="email" type="email" value="{email}" required autocomplete="email" placeholder="you@example.com"></div>
<div><label for="password">Password</label>
<input id="password" name="password" type="password" required autocomplete="current-password"></div>
<button type="submit">Sign In</button>
<p>Don&apos;t have an account? <a href="{signup}">Sign Up</a></p>
</form>
</main>"#,
            action = routes.signin_path,
            banner = error_banner(error),
            email = escape_html(email),
            signup = routes.signup_path,
        ),
    )
}

pub fn signup(error: Option<&str>, name: &str, email: &str, routes: &RoutesConfig) -> String {
    layout(
        "Sign Up",
        &format!(
            r#"<main>
<h1>Create an account</h1>
<p>Get started with {APP_NAME}</p>
<form method="post" action="{action}">
{banner}
<div><label for="name">Name</label>
<input id="name" name="name" type="text" value="{name}" required autocomplete="name" placeholder="Your name"></div>
<div><label for="email">Email</label>
<input id="email" name="email" type="email" value="{email}" required autocomplete="email" placeholder="you@example.com"></div>
<div><label for="password">Password</label>
<input id="password" name="password" type="password" required minlength="8" autocomplete="new-password">
<p class="hint">Min 8 characters, 1 uppercase letter, 1 digit</p></div>
<button type="submit">Sign Up</button>
<p>Already have an account? <a href="{signin}">Sign In</a></p>
</form>
</main>"#,
            action = routes.signup_path,
            banner = error_banner(error),
            name = escape_html(name),
            email = escape_html(email),
            signin = routes.signin_path,
        ),
    )
}

pub fn dashboard(user: &User) -> String {
    let name = escape_html(&user.name);
    layout(
        "Dashboard",
        &format!(
            r#"<header>
<strong>{APP_NAME}</strong>
<div><span>{name}</span>
<form method="post" action="{SIGNOUT_PATH}" style="display:inline"><button type="submit">Sign Out</button></form></div>
</header>
<main>
<h2>Dashboard</h2>
<p>Welcome back, {name}.</p>
</main>"#
        ),
    )
}
