//! Views module - renders the gallery's HTML pages.

use crate::gallery::{ImageRecord, NavTarget, Page};
use crate::paths;

/// Escape HTML special characters to prevent XSS attacks.
fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap page content in the shared document shell.
fn layout(title: &str, body: &str) -> String {
    let escaped_title = html_escape(title);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{escaped_title}</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            background: #f8fafc;
            color: #0f172a;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            padding: 24px;
        }}
        .center {{
            min-height: 80vh;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
            gap: 16px;
        }}
        h1 {{
            font-size: 48px;
            font-weight: 700;
            margin-bottom: 16px;
        }}
        h2 {{
            font-size: 24px;
            margin: 16px 0 8px;
        }}
        .text-lg {{
            font-size: 24px;
        }}
        .row {{
            display: flex;
            flex-wrap: wrap;
            gap: 8px;
            margin: 12px 0;
        }}
        .button {{
            display: inline-block;
            background: #4f46e5;
            color: #fff;
            border: none;
            border-radius: 6px;
            padding: 8px 16px;
            font-size: 14px;
            text-decoration: none;
            cursor: pointer;
        }}
        .button.outline {{
            background: transparent;
            color: #4f46e5;
            border: 1px solid #4f46e5;
        }}
        .card {{
            background: #fff;
            border-radius: 8px;
            box-shadow: 0 1px 3px rgba(0, 0, 0, 0.15);
            padding: 24px;
        }}
        .card form {{
            display: flex;
            flex-direction: column;
            gap: 12px;
            min-width: 280px;
        }}
        .card input {{
            padding: 8px;
            border: 1px solid #cbd5e1;
            border-radius: 4px;
            font-size: 14px;
        }}
        .notice {{
            background: #fee2e2;
            color: #b91c1c;
            border-radius: 4px;
            padding: 8px 12px;
            font-size: 14px;
        }}
        .grid {{
            width: 100%;
            gap: 8px;
        }}
        .image-card {{
            margin-bottom: 8px;
            padding: 8px;
            height: 480px;
            background: #dbeafe;
            break-inside: avoid;
            display: flex;
            flex-direction: column;
            gap: 4px;
        }}
        .image-card img {{
            width: 100%;
            flex: 1;
            min-height: 0;
            object-fit: contain;
        }}
        .preview {{
            width: 33%;
            height: auto;
        }}
    </style>
</head>
<body>
{body}
</body>
</html>"##
    )
}

fn nav_label(target: &NavTarget, home_label: &str, page_label: &str) -> String {
    match target {
        NavTarget::Home => home_label.to_string(),
        NavTarget::Page(n) => format!("{} {}", page_label, n),
    }
}

/// Render a previous/next control row for a page.
fn navigation_row(page: &Page<'_>) -> String {
    let nav = page.navigation();
    format!(
        r#"<div class="row">
    <a class="button" href="{prev_href}">{prev_label}</a>
    <a class="button" href="{next_href}">{next_label}</a>
</div>"#,
        prev_href = nav.previous.href(),
        prev_label = nav_label(&nav.previous, "&#8962; Home", "&larr; Page"),
        next_href = nav.next.href(),
        next_label = nav_label(&nav.next, "&#8962; Home", "Page &rarr;"),
    )
}

/// Render the login form, optionally with a failed-login notice.
pub fn login_page(title: &str, failed: bool) -> String {
    let notice = if failed {
        r#"<div class="notice" role="alert">Wrong username or password</div>"#
    } else {
        ""
    };

    let body = format!(
        r#"<div class="center">
    <div class="card">
        <form method="post" action="{login}">
            {notice}
            <input name="username" placeholder="Username" autocomplete="username" autofocus required>
            <input name="password" type="password" placeholder="Password" autocomplete="current-password" required>
            <button class="button" type="submit">Log in</button>
        </form>
    </div>
</div>"#,
        login = paths::LOGIN,
    );
    layout(title, &body)
}

/// Render the landing page greeting the logged-in user.
pub fn landing_page(title: &str, username: &str) -> String {
    let body = format!(
        r#"<div class="center">
    <div class="text-lg">Hello {username}!</div>
    <a class="text-lg" href="{home}">View Photos</a>
    <div class="text-lg">Log Out</div>
    <form method="post" action="{logout}">
        <button class="button outline" type="submit" aria-label="Log out">&#x21AA;</button>
    </form>
</div>"#,
        username = html_escape(username),
        home = paths::HOME,
        logout = paths::LOGOUT,
    );
    layout(title, &body)
}

/// Render the gallery index with one button per page.
pub fn home_page(title: &str, page_count: usize) -> String {
    let buttons: String = (0..page_count)
        .map(|n| {
            format!(
                r#"    <a class="button" href="{}">{}</a>
"#,
                paths::image_group(n),
                n
            )
        })
        .collect();

    let body = format!(
        r#"<h1>{title}</h1>
<a href="{download_all}">Download All Photos</a>
<h2>View Photos</h2>
<div class="row">
{buttons}</div>"#,
        title = html_escape(title),
        download_all = paths::DOWNLOAD_ALL,
    );
    layout(title, &body)
}

/// Render one gallery page: navigation, image grid, navigation.
pub fn image_group_page(title: &str, page: &Page<'_>, columns: u8) -> String {
    let cards: String = page
        .images()
        .iter()
        .map(|image| {
            format!(
                r#"    <div class="image-card">
        <div>ID: {id}</div>
        <img src="{src}" alt="Photo {id}" loading="lazy">
        <a class="button" href="{download}" download>&#x2B07; Download</a>
    </div>
"#,
                id = html_escape(image.id()),
                src = paths::compressed_image(image.file_name()),
                download = paths::download_image(image.id()),
            )
        })
        .collect();

    let nav = navigation_row(page);
    let body = format!(
        r#"{nav}
<div class="grid" style="columns: {columns};">
{cards}</div>
{nav}"#
    );
    layout(&format!("{} - Page {}", title, page.number()), &body)
}

/// Render the bulk download page with an optional preview image.
pub fn download_all_page(title: &str, archive_href: &str, preview: Option<&ImageRecord>) -> String {
    let preview = preview
        .map(|image| {
            format!(
                r#"<img class="preview" src="{}" alt="Preview">"#,
                paths::compressed_image(image.file_name())
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<div class="row">
    <a class="button" href="{home}">&#8962; Home</a>
    <a class="button" href="{archive_href}" download>&#x2B07; Download All Photos</a>
</div>
{preview}"#,
        home = paths::HOME,
        archive_href = html_escape(archive_href),
    );
    layout(title, &body)
}
