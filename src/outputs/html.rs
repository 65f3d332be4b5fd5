//! Static HTML report.
//!
//! One section per configured source, in configuration order. A source whose
//! front page produced nothing still gets a section with an explicit marker.
//! Sources with authors get a "Datos y Gráficos" block with a badge telling
//! whether any author article looks new.

use crate::models::{RunReport, SourceSection};
use crate::utils::report_path;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::error::Error;
use std::fmt::{self, Write};
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STYLE: &str = r#"
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; max-width: 1200px; margin: 0 auto; padding: 20px; background-color: #f5f5f5; }
        .header { text-align: center; margin-bottom: 30px; padding: 20px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; border-radius: 10px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
        .newspaper-section { margin-bottom: 30px; background: white; border-radius: 10px; padding: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .newspaper-title { font-size: 24px; font-weight: bold; margin-bottom: 15px; padding-bottom: 10px; border-bottom: 2px solid #eee; color: #333; }
        .data-section { margin-top: 20px; padding-top: 20px; border-top: 2px solid #667eea; }
        .data-title { font-size: 20px; font-weight: bold; margin-bottom: 15px; color: #667eea; display: flex; justify-content: space-between; align-items: center; }
        .status-indicator { font-size: 14px; padding: 4px 8px; border-radius: 4px; font-weight: normal; color: white; }
        .status-new { background-color: #28a745; }
        .status-old { background-color: #6c757d; }
        .headline { margin-bottom: 15px; padding: 10px; border-left: 4px solid #667eea; background-color: #f8f9fa; transition: all 0.3s ease; }
        .headline:hover { background-color: #e9ecef; transform: translateX(5px); }
        .headline a { color: #333; text-decoration: none; font-size: 16px; line-height: 1.4; }
        .headline a:hover { color: #667eea; }
        .author-name { font-size: 14px; color: #666; font-style: italic; margin-top: 5px; }
        .timestamp { text-align: center; color: #666; font-size: 14px; margin-top: 20px; }
        .error { color: #dc3545; font-style: italic; }
"#;

/// Badge text and CSS class for a source's author articles.
pub fn freshness_badge(section: &SourceSection) -> (&'static str, &'static str) {
    if section.new_article_count() > 0 {
        ("Hay artículos nuevos", "status-new")
    } else {
        ("Sin novedades", "status-old")
    }
}

/// Render the full report document.
pub fn render_report(report: &RunReport) -> Result<String, fmt::Error> {
    let mut html = String::new();
    let timestamp = report.generated_at.format(DISPLAY_TIMESTAMP_FORMAT).to_string();

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"es\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        html,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(html, "    <title>Titulares de Periódicos - {timestamp}</title>")?;
    writeln!(html, "    <style>{STYLE}    </style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "    <div class=\"header\">")?;
    writeln!(html, "        <h1>📰 Titulares de Periódicos</h1>")?;
    writeln!(html, "        <p>Actualizado el {timestamp}</p>")?;
    writeln!(html, "    </div>")?;

    for section in &report.sections {
        write_section(&mut html, section)?;
    }

    writeln!(html, "    <div class=\"timestamp\">Generado el {timestamp}</div>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}

fn write_section(html: &mut String, section: &SourceSection) -> fmt::Result {
    let name = section.source.display_name();

    writeln!(html, "    <div class=\"newspaper-section\">")?;
    writeln!(html, "        <div class=\"newspaper-title\">📰 {name}</div>")?;

    if section.headlines.is_empty() {
        writeln!(
            html,
            "        <div class=\"headline error\">No se pudieron extraer titulares de {name}</div>"
        )?;
    }
    for (i, headline) in section.headlines.iter().enumerate() {
        writeln!(
            html,
            "        <div class=\"headline\"><a href=\"{}\" target=\"_blank\">{}. {}</a></div>",
            encode_double_quoted_attribute(&headline.link),
            i + 1,
            encode_text(&headline.title)
        )?;
    }

    if section.has_authors {
        write_data_section(html, section)?;
    }

    writeln!(html, "    </div>")
}

fn write_data_section(html: &mut String, section: &SourceSection) -> fmt::Result {
    writeln!(html, "        <div class=\"data-section\">")?;
    writeln!(html, "            <div class=\"data-title\">")?;
    writeln!(html, "                <span>📊 Datos y Gráficos</span>")?;
    if !section.author_articles.is_empty() {
        let (label, class) = freshness_badge(section);
        writeln!(
            html,
            "                <span class=\"status-indicator {class}\">{label}</span>"
        )?;
    }
    writeln!(html, "            </div>")?;

    if section.author_articles.is_empty() {
        writeln!(
            html,
            "            <div class=\"headline error\">Sin artículos disponibles</div>"
        )?;
    }
    for article in &section.author_articles {
        writeln!(html, "            <div class=\"headline\">")?;
        writeln!(
            html,
            "                <a href=\"{}\" target=\"_blank\">{}</a>",
            encode_double_quoted_attribute(&article.link),
            encode_text(&article.title)
        )?;
        writeln!(
            html,
            "                <div class=\"author-name\">Por {}</div>",
            encode_text(&article.author)
        )?;
        writeln!(html, "            </div>")?;
    }

    writeln!(html, "        </div>")
}

/// Render the report and write it as `titulares_YYYYMMDD_HHMMSS.html` in `dir`.
#[instrument(level = "info", skip_all, fields(%dir))]
pub async fn write_html_report(report: &RunReport, dir: &str) -> Result<PathBuf, Box<dyn Error>> {
    let html = render_report(report)?;
    let path = report_path(dir, report.generated_at, "html");
    fs::write(&path, html).await?;
    info!(path = %path.display(), "Wrote HTML report");
    Ok(path)
}
