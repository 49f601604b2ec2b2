//! HTML screen templates

use crate::artifacts::ScreenSpec;
use crate::core::string::{escape_html, title_case};

const BASE_STYLE: &str = "\
*{box-sizing:border-box;margin:0;padding:0}\
body{font-family:system-ui,-apple-system,'Segoe UI',sans-serif;background:#f5f6f8;color:#1f2933;line-height:1.5}\
header{background:#fff;border-bottom:1px solid #e4e7eb;padding:16px 24px;display:flex;justify-content:space-between;align-items:center}\
main{max-width:1200px;margin:0 auto;padding:24px}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:16px}\
.card{background:#fff;border:1px solid #e4e7eb;border-radius:8px;padding:16px}\
.btn{display:inline-block;background:#3b5bdb;color:#fff;border:none;border-radius:6px;padding:10px 18px;font-size:14px;cursor:pointer}\
.muted{color:#7b8794;font-size:14px}\
input{width:100%;padding:10px;border:1px solid #cbd2d9;border-radius:6px;margin:6px 0 14px}\
@media (max-width:767px){main{padding:16px}header{padding:12px 16px}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Template {
    Dashboard,
    Login,
    Product,
    Profile,
    Generic,
}

impl Template {
    fn for_screen(screen: &ScreenSpec) -> Self {
        let haystack = format!("{} {}", screen.id, screen.name).to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| haystack.contains(n));
        if has(&["login", "sign in", "signin", "sign_in", "register", "signup", "auth"]) {
            Template::Login
        } else if has(&["dashboard", "overview", "home", "analytics"]) {
            Template::Dashboard
        } else if has(&["product", "catalog", "listing", "cart", "shop"]) {
            Template::Product
        } else if has(&["profile", "account"]) {
            Template::Profile
        } else {
            Template::Generic
        }
    }
}

/// A complete, self-contained HTML document around a body fragment
pub fn document_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>",
        escape_html(title),
        BASE_STYLE,
        body
    )
}

/// Render a screen as a full HTML document from the matching template
pub fn render_screen(screen: &ScreenSpec, subject: &str) -> String {
    let header = format!(
        "<header><strong>{}</strong><nav class=\"muted\">{}</nav></header>",
        escape_html(subject),
        escape_html(&screen.name)
    );
    let body = match Template::for_screen(screen) {
        Template::Dashboard => dashboard_body(screen),
        Template::Login => login_body(screen),
        Template::Product => product_body(screen),
        Template::Profile => profile_body(screen),
        Template::Generic => generic_body(screen),
    };
    document_shell(&screen.name, &format!("{header}\n<main>\n{body}\n</main>"))
}

fn heading(screen: &ScreenSpec) -> String {
    let description = if screen.description.is_empty() {
        String::new()
    } else {
        format!("<p class=\"muted\">{}</p>", escape_html(&screen.description))
    };
    format!("<h1>{}</h1>{}", escape_html(&screen.name), description)
}

fn element_label(element: &str) -> String {
    escape_html(&title_case(&element.replace(['_', '-'], " ")))
}

fn dashboard_body(screen: &ScreenSpec) -> String {
    let cards: String = ["Active", "This week", "Pending", "Completed"]
        .iter()
        .enumerate()
        .map(|(i, label)| {
            format!(
                "<div class=\"card\"><p class=\"muted\">{label}</p><h2>{}</h2></div>",
                (i + 1) * 12
            )
        })
        .collect();
    format!(
        "{}\n<section class=\"grid\" style=\"margin-top:16px\">{cards}</section>\n\
         <section class=\"card\" style=\"margin-top:16px\"><h3>Recent activity</h3>\
         <ul class=\"muted\"><li>Item updated</li><li>New entry added</li><li>Report generated</li></ul></section>",
        heading(screen)
    )
}

fn login_body(screen: &ScreenSpec) -> String {
    format!(
        "<section class=\"card\" style=\"max-width:400px;margin:48px auto\">{}\n\
         <form><label>Email<input type=\"email\" placeholder=\"you@example.com\"></label>\
         <label>Password<input type=\"password\"></label>\
         <button class=\"btn\" type=\"submit\">Sign in</button></form>\
         <p class=\"muted\" style=\"margin-top:12px\">No account yet? <a href=\"#\">Create one</a></p></section>",
        heading(screen)
    )
}

fn product_body(screen: &ScreenSpec) -> String {
    let items: String = (1..=6)
        .map(|i| {
            format!(
                "<div class=\"card\"><div style=\"height:140px;background:#e4e7eb;border-radius:6px\"></div>\
                 <h3 style=\"margin-top:8px\">Item {i}</h3><p class=\"muted\">${}.00</p>\
                 <button class=\"btn\" style=\"margin-top:8px\">Add to cart</button></div>",
                i * 10 + 9
            )
        })
        .collect();
    format!(
        "{}\n<input type=\"search\" placeholder=\"Search\">\n<section class=\"grid\">{items}</section>",
        heading(screen)
    )
}

fn profile_body(screen: &ScreenSpec) -> String {
    format!(
        "<section class=\"card\" style=\"display:flex;gap:16px;align-items:center\">\
         <div style=\"width:72px;height:72px;border-radius:50%;background:#cbd2d9\"></div>\
         <div>{}</div></section>\n\
         <section class=\"grid\" style=\"margin-top:16px\">\
         <div class=\"card\"><h3>About</h3><p class=\"muted\">Short bio goes here.</p></div>\
         <div class=\"card\"><h3>Activity</h3><p class=\"muted\">Recent posts and updates.</p></div>\
         </section>",
        heading(screen)
    )
}

fn generic_body(screen: &ScreenSpec) -> String {
    let sections: String = if screen.elements.is_empty() {
        "<div class=\"card\"><p class=\"muted\">Content</p></div>".to_string()
    } else {
        screen
            .elements
            .iter()
            .map(|e| format!("<div class=\"card\"><h3>{}</h3></div>", element_label(e)))
            .collect()
    };
    format!(
        "{}\n<section class=\"grid\" style=\"margin-top:16px\">{sections}</section>",
        heading(screen)
    )
}
