//! Server-side HTML rendering
//!
//! Pages are plain HTML with Mermaid sources in `<pre class="mermaid">`
//! blocks; `/static/app.js` turns those into diagrams in the browser.

use html_escape::encode_text;
use mdv_common::{Diagram, DiagramType, Section};
use std::fmt::Write;

const MERMAID_CDN: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js";

/// Content of the placeholder diagram shown on 404 pages
pub const NOT_FOUND_CONTENT: &str =
    "graph TD\n    A[Diagram Not Found] --> B[Return to Home]\n    B --> C[Browse Available Diagrams]";

/// Convert text to a URL-friendly slug
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-` and drops leading and trailing dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Shared page data: application name and the navigation list
pub struct PageContext<'a> {
    pub app_name: &'a str,
    pub nav: &'a [Diagram],
}

/// Placeholder record rendered when a diagram lookup fails
pub fn not_found_diagram() -> Diagram {
    Diagram {
        id: 0,
        title: "404 - Diagram Not Found".to_string(),
        content: NOT_FOUND_CONTENT.to_string(),
        diagram_type: DiagramType::Flowchart,
        section: 0,
    }
}

/// Home page: section summaries plus the first diagram as a preview
pub fn index_page(ctx: &PageContext<'_>, sections: &[Section], preview: Option<&Diagram>) -> String {
    let mut body = String::from("<h1>Diagrams</h1>\n<ol class=\"sections\">\n");
    for section in sections {
        let _ = writeln!(
            body,
            "<li><a href=\"/diagram/section/{number}\">{number}. {title}</a><pre class=\"preview\">{preview}</pre></li>",
            number = section.number,
            title = encode_text(&section.title),
            preview = encode_text(&section.content_preview),
        );
    }
    body.push_str("</ol>\n");

    if let Some(diagram) = preview {
        let _ = write!(
            body,
            "<section class=\"preview-diagram\">\n<h2>{title}</h2>\n{figure}</section>\n",
            title = encode_text(&diagram.title),
            figure = mermaid_block(diagram),
        );
    }

    layout(ctx, "Home", &body)
}

/// Table of every diagram
pub fn list_page(ctx: &PageContext<'_>, diagrams: &[Diagram]) -> String {
    let mut body = String::from(
        "<h1>All Diagrams</h1>\n<table>\n<tr><th>Section</th><th>Title</th><th>Type</th></tr>\n",
    );
    for diagram in diagrams {
        let _ = writeln!(
            body,
            "<tr id=\"{slug}\"><td>{section}</td><td><a href=\"/diagram/{id}\">{title}</a></td><td>{kind}</td></tr>",
            slug = slugify(&diagram.title),
            section = diagram.section,
            id = diagram.id,
            title = encode_text(&diagram.title),
            kind = diagram.diagram_type,
        );
    }
    body.push_str("</table>\n");

    layout(ctx, "All Diagrams", &body)
}

/// Single diagram page, optionally with an error banner
pub fn diagram_page(ctx: &PageContext<'_>, diagram: &Diagram, error_message: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(message) = error_message {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", encode_text(message));
    }
    let _ = write!(
        body,
        "<article id=\"{slug}\">\n<h1>{title}</h1>\n<p class=\"meta\">Section {section} &middot; {kind}</p>\n{figure}<details><summary>Source</summary><pre>{source}</pre></details>\n</article>\n",
        slug = slugify(&diagram.title),
        title = encode_text(&diagram.title),
        section = diagram.section,
        kind = diagram.diagram_type,
        figure = mermaid_block(diagram),
        source = encode_text(&diagram.content),
    );

    layout(ctx, &diagram.title, &body)
}

fn mermaid_block(diagram: &Diagram) -> String {
    format!(
        "<pre class=\"mermaid\" data-type=\"{}\">{}</pre>\n",
        diagram.diagram_type,
        encode_text(&diagram.content)
    )
}

fn nav_list(nav: &[Diagram]) -> String {
    let mut items = String::new();
    for diagram in nav {
        let _ = writeln!(
            items,
            "<li id=\"nav-{slug}\"><a href=\"/diagram/{id}\">{section}. {title}</a> <span class=\"type\">{kind}</span></li>",
            slug = slugify(&diagram.title),
            id = diagram.id,
            section = diagram.section,
            title = encode_text(&diagram.title),
            kind = diagram.diagram_type,
        );
    }
    items
}

fn layout(ctx: &PageContext<'_>, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - {app_name}</title>
<script src="{cdn}"></script>
<script defer src="/static/app.js"></script>
</head>
<body>
<header>
<a class="brand" href="/">{app_name}</a>
<a href="/diagrams">All diagrams</a>
<input id="search" type="search" placeholder="Search diagrams" autocomplete="off">
<ul id="search-results"></ul>
</header>
<nav>
<ul>
{nav}</ul>
</nav>
<main>
{body}</main>
</body>
</html>
"#,
        title = encode_text(title),
        app_name = encode_text(ctx.app_name),
        cdn = MERMAID_CDN,
        nav = nav_list(ctx.nav),
        body = body,
    )
}
