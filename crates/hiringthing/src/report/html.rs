use std::error::Error;
use std::fmt::{self, Display};

use super::DashboardReport;
use crate::model::Application;

const PAGE_STYLE: &str = "table, td { border: 1px solid black; padding: 0; margin: 0; border-collapse: collapse; }\n\
td { padding: 5px; }\n\
thead td { background-color: black; color: white; font-weight: bold; }\n";

impl Display for DashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_page_head(f, "HiringThing dashboard")?;

        writeln!(f, "<h2>Jobs</h2>")?;
        let jobs = Table {
            headers: &["ID", "Title", "Abstract", "Archived"],
            rows: self
                .jobs
                .iter()
                .map(|job| {
                    vec![
                        job.id.to_string(),
                        job.title.clone(),
                        job.r#abstract.clone(),
                        yes_no(job.archived).to_string(),
                    ]
                })
                .collect(),
        };
        write!(f, "{jobs}")?;

        writeln!(f, "<h2>Applications (rated)</h2>")?;
        let rated = Table {
            headers: &["ID", "Job", "Name", "Rating", "Archived"],
            rows: self
                .rated_applications
                .iter()
                .map(|application| {
                    vec![
                        application.id.to_string(),
                        application.job.to_string(),
                        application.full_name(),
                        rating_text(application),
                        yes_no(application.archived).to_string(),
                    ]
                })
                .collect(),
        };
        write!(f, "{rated}")?;

        match &self.focus {
            Some(focus) => {
                writeln!(
                    f,
                    "<h2>Applications (unrated) for {} (ID: {})</h2>",
                    escape_html(&focus.job.title),
                    escape_html(focus.job.id.as_str())
                )?;
                let unrated = Table {
                    headers: &["ID", "Job", "Name", "Archived"],
                    rows: focus
                        .unrated_applications
                        .iter()
                        .map(|application| {
                            vec![
                                application.id.to_string(),
                                application.job.to_string(),
                                application.full_name(),
                                yes_no(application.archived).to_string(),
                            ]
                        })
                        .collect(),
                };
                write!(f, "{unrated}")?;
            }
            None => {
                writeln!(f, "<h2>Applications (unrated)</h2>")?;
                writeln!(f, "<p>No active jobs.</p>")?;
            }
        }

        writeln!(
            f,
            "<p><small>Generated {}</small></p>",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        write_page_tail(f)
    }
}

/// Page shown when the dashboard could not be collected.
pub fn render_error_html(error: &(dyn Error + 'static)) -> String {
    let mut page = String::new();
    // Writing into a String cannot fail.
    let _ = write_error_page(&mut page, error);
    page
}

fn write_error_page(out: &mut impl fmt::Write, error: &(dyn Error + 'static)) -> fmt::Result {
    write_page_head(out, "HiringThing dashboard unavailable")?;
    writeln!(out, "<h2>Unable to load data</h2>")?;
    writeln!(out, "<p>{}</p>", escape_html(&error.to_string()))?;

    let mut source = error.source();
    if source.is_some() {
        writeln!(out, "<ul>")?;
        while let Some(cause) = source {
            writeln!(out, "<li>{}</li>", escape_html(&cause.to_string()))?;
            source = cause.source();
        }
        writeln!(out, "</ul>")?;
    }
    write_page_tail(out)
}

fn write_page_head(out: &mut impl fmt::Write, title: &str) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape_html(title))?;
    writeln!(out, "<style>\n{PAGE_STYLE}</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")
}

fn write_page_tail(out: &mut impl fmt::Write) -> fmt::Result {
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

struct Table<'a> {
    headers: &'a [&'a str],
    rows: Vec<Vec<String>>,
}

impl Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<table cellpadding=\"0\" cellspacing=\"0\">")?;
        writeln!(f, "<thead>\n  <tr>")?;
        for header in self.headers {
            writeln!(f, "  <td>{}</td>", escape_html(header))?;
        }
        writeln!(f, "  </tr>\n</thead>")?;

        writeln!(f, "<tbody>")?;
        if self.rows.is_empty() {
            writeln!(
                f,
                "  <tr><td colspan=\"{}\">No records</td></tr>",
                self.headers.len()
            )?;
        }
        for row in &self.rows {
            writeln!(f, "  <tr>")?;
            for cell in row {
                writeln!(f, "  <td>{}</td>", escape_html(cell))?;
            }
            writeln!(f, "  </tr>")?;
        }
        writeln!(f, "</tbody>")?;
        writeln!(f, "</table>")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn rating_text(application: &Application) -> String {
    application
        .rating
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
