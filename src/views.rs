//! HTML rendering for the browser pages.
//!
//! Pages are assembled from string templates. Every value that came from a
//! user or from the record file goes through [`escape`].

use std::fmt::Write;

use crate::{
    models::{
        content::{Category, ContentRequest, GeneratedContent, Tone},
        demo_code::DemoCode,
        trial::{AdminAction, TrialRow},
    },
    services::access_service::Access,
    state::Branding,
};

const PAGE_CSS: &str = r#"<style>
body { font-family: Inter, Arial, sans-serif; max-width: 760px; margin: 0 auto; padding: 16px; color: #222; }
.watermark { position: fixed; top: 10px; right: 14px; font-size: 12px; color: #666;
  background: rgba(255,255,255,0.85); padding: 6px 8px; border-radius: 6px; }
header { text-align: center; margin: 8px 0 18px; }
header h1 { font-size: 28px; font-weight: 800; margin: 0; }
header p { color: #004aad; font-size: 14px; margin-top: 6px; }
.notice { color: #444; background: #f2f2f2; padding: 12px; border-radius: 8px; }
.ok { background: #e8f6ec; padding: 10px; border-radius: 8px; }
.warn { background: #fff4e0; padding: 10px; border-radius: 8px; }
.err { background: #fdecea; padding: 10px; border-radius: 8px; }
table { border-collapse: collapse; width: 100%; font-size: 14px; }
th, td { border-bottom: 1px solid #eee; padding: 4px 6px; text-align: left; }
label { display: block; margin-top: 10px; }
pre { background: #f6f6f6; padding: 8px; border-radius: 6px; }
footer { margin-top: 24px; color: #888; font-size: 12px; }
</style>"#;

/// Escape text for use in HTML content and attribute values.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn shell(branding: &Branding, body: &str) -> String {
    let name = escape(&branding.app_name);
    let slogan = escape(&branding.slogan);
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{name} Demo</title>{PAGE_CSS}</head>\n\
         <body><div class=\"watermark\">Powered by {name}</div>\n\
         <header><h1>{name}</h1><p>{slogan}</p></header>\n{body}\n\
         <footer>{name} | Demo Version</footer></body></html>"
    )
}

fn code_form(error: Option<&str>) -> String {
    let mut html = String::from(
        "<div class=\"notice\">Use the demo code you were given. Enjoy!</div>\n",
    );
    if let Some(error) = error {
        let _ = write!(html, "<p class=\"err\">{}</p>", escape(error));
    }
    html.push_str(
        "<form method=\"post\" action=\"/\">\
         <label>Demo code <input type=\"password\" name=\"code\" autofocus></label>\
         <button type=\"submit\">Enter</button></form>",
    );
    html
}

/// Landing page with the demo code form.
pub fn login_page(branding: &Branding, error: Option<&str>) -> String {
    shell(branding, &code_form(error))
}

/// Shown to a valid code whose trial has passed.
pub fn expired_page(branding: &Branding, access: &Access, trial_days: i64) -> String {
    let first_use = access
        .trial
        .first_use
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let body = format!(
        "<p class=\"warn\">The {trial_days}-day trial for this code has expired.</p>\
         <ul><li><b>Code:</b> {}</li><li><b>First use:</b> {first_use}</li></ul>\
         <p class=\"notice\">Contact the {} team to enable full access.</p>",
        escape(access.trial.code.as_str()),
        escape(&branding.app_name),
    );
    shell(branding, &body)
}

fn options<T: Copy + PartialEq>(
    all: &[T],
    selected: T,
    value: impl Fn(&T) -> &'static str,
    label: impl Fn(&T) -> &'static str,
) -> String {
    all.iter()
        .map(|item| {
            let marker = if *item == selected { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{marker}>{}</option>",
                value(item),
                label(item)
            )
        })
        .collect()
}

/// The content generator for an active code, optionally with a result.
///
/// `input` pre-fills the form with the last submission.
pub fn generator_page(
    branding: &Branding,
    code: &DemoCode,
    remaining_days: Option<i64>,
    input: &ContentRequest,
    content: Option<&GeneratedContent>,
    error: Option<&str>,
) -> String {
    let mut body = format!(
        "<p class=\"ok\">Signed in: <b>{}</b>. Trial active.</p>",
        escape(code.as_str())
    );
    if let Some(days) = remaining_days {
        let _ = write!(body, "<p class=\"notice\">About <b>{days}</b> trial days left for this code.</p>");
    }

    let _ = write!(
        body,
        "<h2>E-shop Content Assistant (Demo)</h2>\
         <p>Generate a product description, SEO title and social media tags.</p>\
         <form method=\"post\" action=\"/generate\">\
         <input type=\"hidden\" name=\"code\" value=\"{code}\">\
         <label>Product name <input name=\"product_name\" value=\"{product_name}\"></label>\
         <label>Category <select name=\"category\">{categories}</select></label>\
         <label>Keywords <input name=\"keywords\" value=\"{keywords}\" placeholder=\"cotton, durable, formal\"></label>\
         <label>Tone <select name=\"tone\">{tones}</select></label>\
         <button type=\"submit\">Create sample description</button></form>",
        code = escape(code.as_str()),
        product_name = escape(&input.product_name),
        keywords = escape(&input.keywords),
        categories = options(&Category::ALL, input.category, Category::value, Category::label),
        tones = options(&Tone::ALL, input.tone, Tone::value, Tone::label),
    );

    if let Some(error) = error {
        let _ = write!(body, "<p class=\"warn\">{}</p>", escape(error));
    }

    if let Some(content) = content {
        let paragraphs: String = content
            .description
            .split("\n\n")
            .map(|p| format!("<p>{}</p>", escape(p)))
            .collect();
        let _ = write!(
            body,
            "<h3>Sample title</h3><p>{title}</p>\
             <h3>Sample description</h3>{paragraphs}\
             <h3>Suggested hashtags</h3><pre>{tags}</pre>\
             <p class=\"ok\">Demo description created. The full version adds multiple variants, \
             SEO optimization, CSV/PDF export and automatic translations.</p>",
            title = escape(&content.title),
            tags = escape(&content.tags_line()),
        );
        let _ = write!(
            body,
            "<form method=\"post\" action=\"/export\">\
             <input type=\"hidden\" name=\"code\" value=\"{code}\">\
             <input type=\"hidden\" name=\"product_name\" value=\"{product_name}\">\
             <input type=\"hidden\" name=\"category\" value=\"{category}\">\
             <input type=\"hidden\" name=\"keywords\" value=\"{keywords}\">\
             <input type=\"hidden\" name=\"tone\" value=\"{tone}\">\
             <button type=\"submit\">Download description (.txt)</button></form>",
            code = escape(code.as_str()),
            product_name = escape(&input.product_name),
            category = input.category.value(),
            keywords = escape(&input.keywords),
            tone = input.tone.value(),
        );
    }

    shell(branding, &body)
}

fn cell(value: Option<impl ToString>, missing: &str) -> String {
    value
        .map(|v| escape(&v.to_string()))
        .unwrap_or_else(|| missing.to_string())
}

/// Admin table of every code plus the action form.
pub fn admin_page(
    branding: &Branding,
    admin_code: &DemoCode,
    rows: &[TrialRow],
    targets: &[DemoCode],
    message: Option<&str>,
) -> String {
    let mut body = String::from(
        "<p class=\"ok\">Admin sign-in. The admin panel is shown below.</p>\
         <h2>Admin Panel</h2>",
    );
    if let Some(message) = message {
        let _ = write!(body, "<p class=\"ok\">{}</p>", escape(message));
    }

    body.push_str(
        "<table><tr><th>code</th><th>first_use</th><th>days_passed</th>\
         <th>remaining_days</th><th>status</th><th>uses</th></tr>",
    );
    for row in rows {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(row.code.as_str()),
            cell(row.first_use, "-"),
            cell(row.days_passed, "-"),
            cell(row.remaining_days, "&infin;"),
            row.status.as_str(),
            row.uses,
        );
    }
    body.push_str("</table>");

    let target_options: String = targets
        .iter()
        .map(|code| {
            let code = escape(code.as_str());
            format!("<option value=\"{code}\">{code}</option>")
        })
        .collect();
    let action_options: String = AdminAction::ALL
        .iter()
        .map(|action| format!("<option value=\"{0}\">{0}</option>", action.as_str()))
        .collect();
    let _ = write!(
        body,
        "<h3>Actions</h3>\
         <p>Reset starts the trial today; force-expire ends it; clear forgets the code.</p>\
         <form method=\"post\" action=\"/admin/action\">\
         <input type=\"hidden\" name=\"code\" value=\"{0}\">\
         <label>Code <select name=\"target\">{target_options}</select></label>\
         <label>Action <select name=\"action\">{action_options}</select></label>\
         <button type=\"submit\">Run action</button></form>\
         <h3>Export</h3>\
         <form method=\"post\" action=\"/admin/export\">\
         <input type=\"hidden\" name=\"code\" value=\"{0}\">\
         <button type=\"submit\">Download trials.json</button></form>\
         <p class=\"notice\">Only the admin sees this page. Deleting the trial file erases all trial history.</p>",
        escape(admin_code.as_str()),
    );

    shell(branding, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<b class="x">Tom & 'Jerry'</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn generator_form_keeps_submitted_values() {
        let branding = Branding {
            app_name: "Acme".to_string(),
            slogan: "Fast".to_string(),
        };
        let code = DemoCode::parse("demo1").unwrap();
        let input = ContentRequest {
            product_name: "Desk \"Pro\" Lamp".to_string(),
            category: Category::Electronics,
            keywords: "warm, dimmable".to_string(),
            tone: Tone::Short,
        };

        let html = generator_page(&branding, &code, Some(3), &input, None, Some("warning"));

        assert!(html.contains("name=\"product_name\" value=\"Desk &quot;Pro&quot; Lamp\""));
        assert!(html.contains("name=\"keywords\" value=\"warm, dimmable\""));
        assert!(html.contains("<option value=\"electronics\" selected>"));
        assert!(html.contains("<option value=\"short\" selected>"));
        assert!(!html.contains("action=\"/export\""));
    }

    #[test]
    fn login_page_shows_branding_and_error() {
        let branding = Branding {
            app_name: "Acme <Labs>".to_string(),
            slogan: "Fast".to_string(),
        };
        let html = login_page(&branding, Some("Invalid demo code"));

        assert!(html.contains("Acme &lt;Labs&gt;"));
        assert!(html.contains("Invalid demo code"));
        assert!(html.contains("name=\"code\""));
    }
}
