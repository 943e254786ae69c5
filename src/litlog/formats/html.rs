//! HTML report
//!
//! Renders a document of log entries as one static page. Entries are grouped into
//! sections before rendering:
//!
//!     task, task_result     one section with an Input and an Output pane
//!     task                  one section with an Input pane
//!     task_result           one section with an Output pane
//!     anything else         one plain section
//!
//! Entries are matched on their `type` key. Each section is titled `"{n}. {name}"` from
//! the entry's `payload.name`, or `"Item {n}"` when there is none.
//!
//! Every entry body shows a Key Information summary, the remaining fields grouped by
//! kind, and a collapsible raw JSON view. The section's JSON is also stored in its
//! `data-content` attribute, which the page's search script matches against.

use super::json::pretty_json;
use super::registry::{FormatError, Formatter};
use crate::litlog::config::ReportConfig;
use crate::litlog::value::Value;

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const SEARCH_ICON: &str = r#"<svg class="w-5 h-5 text-gray-400" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0z"></path></svg>"#;

/// `{debounce_ms}` is substituted at render time.
const SEARCH_SCRIPT: &str = r#"<script>
  const searchInput = document.getElementById('searchInput');
  const searchResults = document.getElementById('searchResults');
  const logItems = document.querySelectorAll('.log-item');

  function performSearch() {
    const term = searchInput.value.toLowerCase().trim();
    let visible = 0;
    logItems.forEach(item => {
      const content = item.getAttribute('data-content').toLowerCase();
      const show = term === '' || content.includes(term);
      item.style.display = show ? 'block' : 'none';
      if (show) visible++;
    });
    if (term === '') {
      searchResults.textContent = '';
      return;
    }
    searchResults.textContent = `Found ${visible} matching items`;
    if (visible === 0) {
      searchResults.textContent += ' - try different keywords';
      searchResults.className = 'mt-2 text-sm text-red-600';
    } else {
      searchResults.className = 'mt-2 text-sm text-green-600';
    }
  }

  let searchTimeout;
  searchInput.addEventListener('input', () => {
    clearTimeout(searchTimeout);
    searchTimeout = setTimeout(performSearch, {debounce_ms});
  });

  document.addEventListener('keydown', (e) => {
    if (e.ctrlKey && e.key === 'f') {
      e.preventDefault();
      searchInput.focus();
    }
  });
</script>"#;

/// A group of entries rendered as one collapsible section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Section<'a> {
    Pair {
        task: Option<&'a Value>,
        result: Option<&'a Value>,
    },
    Single(&'a Value),
}

impl<'a> Section<'a> {
    pub fn entries(&self) -> Vec<&'a Value> {
        match self {
            Section::Pair { task, result } => task.iter().chain(result.iter()).copied().collect(),
            Section::Single(entry) => vec![*entry],
        }
    }

    /// `payload.name` of the entry that names this section.
    fn name(&self) -> Option<String> {
        let entry = match self {
            Section::Pair {
                task: Some(task), ..
            } => Some(*task),
            Section::Pair { result, .. } => *result,
            Section::Single(entry) => Some(*entry),
        };
        entry
            .and_then(|entry| entry.get_path(&["payload", "name"]))
            .filter(|name| !name.is_null())
            .map(Value::to_plain_string)
            .filter(|name| !name.is_empty())
    }

    pub fn title(&self, number: usize) -> String {
        match self.name() {
            Some(name) => format!("{number}. {name}"),
            None => format!("Item {number}"),
        }
    }
}

fn entry_type(entry: &Value) -> Option<&str> {
    entry.get("type").and_then(Value::as_str)
}

/// Group consecutive task / task_result entries.
pub fn pair_entries(entries: &[Value]) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut iter = entries.iter().peekable();

    while let Some(entry) = iter.next() {
        let section = match entry_type(entry) {
            Some("task") => Section::Pair {
                task: Some(entry),
                result: iter.next_if(|next| entry_type(next) == Some("task_result")),
            },
            Some("task_result") => Section::Pair {
                task: None,
                result: Some(entry),
            },
            _ => Section::Single(entry),
        };
        sections.push(section);
    }

    sections
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `user_query` -> `User Query`
fn title_case(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut word_start = true;
    for ch in key.chars() {
        if ch == '_' {
            label.push(' ');
            word_start = true;
        } else if ch.is_alphabetic() {
            if word_start {
                label.extend(ch.to_uppercase());
            } else {
                label.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            label.push(ch);
            word_start = true;
        }
    }
    label
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Text,
    Scalar,
    Array,
    Object,
    Other,
}

impl Category {
    const ALL: [Category; 5] = [
        Category::Text,
        Category::Scalar,
        Category::Array,
        Category::Object,
        Category::Other,
    ];

    fn of(value: &Value) -> Self {
        match value {
            Value::Str(_) | Value::Object(_) => Category::Text,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => Category::Scalar,
            Value::List(_) | Value::Tuple(_) | Value::Set(_) => Category::Array,
            Value::Dict(_) => Category::Object,
            Value::Null => Category::Other,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Category::Text => "Text Fields",
            Category::Scalar => "Numbers & Booleans",
            Category::Array => "Arrays",
            Category::Object => "Objects",
            Category::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Pane {
    Input,
    Output,
}

impl Pane {
    fn label(self) -> &'static str {
        match self {
            Pane::Input => "Input",
            Pane::Output => "Output",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Pane::Input => "blue",
            Pane::Output => "green",
        }
    }
}

pub struct HtmlFormatter {
    config: ReportConfig,
}

impl HtmlFormatter {
    pub fn new(config: ReportConfig) -> Self {
        HtmlFormatter { config }
    }

    /// Render a page for `entries`.
    pub fn render(&self, entries: &[Value]) -> Result<String, FormatError> {
        let sections = pair_entries(entries);
        tracing::debug!(
            entries = entries.len(),
            sections = sections.len(),
            "rendering html report"
        );

        let mut writer = ReportWriter {
            config: &self.config,
            output: String::new(),
            indent_level: 0,
        };
        writer.write_head();
        for (index, section) in sections.iter().enumerate() {
            writer.write_section(index + 1, section)?;
        }
        writer.write_tail();
        Ok(writer.output)
    }
}

impl Formatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatError> {
        match value.as_sequence() {
            Some(entries) => self.render(entries),
            None => self.render(std::slice::from_ref(value)),
        }
    }

    fn description(&self) -> &str {
        "Searchable HTML report of log entries"
    }
}

struct ReportWriter<'c> {
    config: &'c ReportConfig,
    output: String,
    indent_level: usize,
}

impl<'c> ReportWriter<'c> {
    fn line(&mut self, text: &str) {
        self.output.push_str(&"  ".repeat(self.indent_level));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.indent_level += 1;
    }

    fn close(&mut self, text: &str) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.line(text);
    }

    fn write_head(&mut self) {
        let title = escape_html(&self.config.title);
        let heading = escape_html(&self.config.heading);
        let placeholder = escape_html(&self.config.search_placeholder);

        self.line("<!DOCTYPE html>");
        self.open("<html>");
        self.open("<head>");
        self.line(r#"<meta charset="utf-8">"#);
        self.line(&format!("<title>{title}</title>"));
        self.line(&format!(r#"<script src="{TAILWIND_CDN}"></script>"#));
        self.close("</head>");
        self.open(r#"<body class="bg-gray-50 p-8">"#);
        self.open(r#"<div class="max-w-6xl mx-auto">"#);
        self.line(&format!(
            r#"<h1 class="text-3xl font-bold text-gray-800 mb-6">{heading}</h1>"#
        ));
        self.open(r#"<div class="mb-6">"#);
        self.open(r#"<div class="relative">"#);
        self.line(&format!(
            r#"<input type="text" id="searchInput" placeholder="{placeholder}" class="w-full px-4 py-2 pl-10 pr-4 text-gray-700 bg-white border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500">"#
        ));
        self.line(&format!(
            r#"<div class="absolute inset-y-0 left-0 flex items-center pl-3">{SEARCH_ICON}</div>"#
        ));
        self.close("</div>");
        self.line(r#"<div id="searchResults" class="mt-2 text-sm text-gray-600"></div>"#);
        self.close("</div>");
        self.open(r#"<div class="space-y-4" id="dataContainer">"#);
    }

    fn write_tail(&mut self) {
        self.close("</div>");
        self.close("</div>");
        let script = SEARCH_SCRIPT.replace(
            "{debounce_ms}",
            &self.config.search_debounce_ms.to_string(),
        );
        for line in script.lines() {
            self.line(line);
        }
        self.close("</body>");
        self.close("</html>");
    }

    fn write_section(&mut self, number: usize, section: &Section<'_>) -> Result<(), FormatError> {
        let search_content = section
            .entries()
            .into_iter()
            .map(|entry| pretty_json(entry, self.config.json_indent))
            .collect::<Result<Vec<_>, _>>()?
            .join(" ");

        self.open(&format!(
            r#"<div class="log-item bg-white rounded-lg shadow-md border border-gray-200" data-content="{}">"#,
            escape_html(&search_content)
        ));
        self.open("<details>");
        self.line(&format!(
            r#"<summary class="cursor-pointer p-4 font-medium text-gray-700 hover:bg-gray-50 rounded-lg">{}</summary>"#,
            escape_html(&section.title(number))
        ));

        match section {
            Section::Single(entry) => {
                self.open(r#"<div class="px-4 pb-4">"#);
                self.write_entry_body(entry)?;
                self.close("</div>");
            }
            Section::Pair { task, result } => {
                self.open(r#"<div class="px-4 pb-4 space-y-3">"#);
                if let Some(task) = task {
                    self.write_pane(Pane::Input, task)?;
                }
                if let Some(result) = result {
                    self.write_pane(Pane::Output, result)?;
                }
                self.close("</div>");
            }
        }

        self.close("</details>");
        self.close("</div>");
        Ok(())
    }

    fn write_pane(&mut self, pane: Pane, entry: &Value) -> Result<(), FormatError> {
        let color = pane.color();
        self.open(&format!(
            r#"<div class="bg-{color}-50 rounded border border-{color}-200">"#
        ));
        self.open("<details>");
        self.line(&format!(
            r#"<summary class="cursor-pointer p-3 font-medium text-{color}-700 hover:bg-{color}-100 rounded">{}</summary>"#,
            pane.label()
        ));
        self.open(r#"<div class="px-3 pb-3">"#);
        self.write_entry_body(entry)?;
        self.close("</div>");
        self.close("</details>");
        self.close("</div>");
        Ok(())
    }

    fn write_entry_body(&mut self, entry: &Value) -> Result<(), FormatError> {
        let summary = key_information(self.config, entry);
        let mut wrote_content = false;

        if !summary.is_empty() {
            self.open(r#"<div class="mb-4 p-3 bg-blue-50 rounded border-l-4 border-blue-400">"#);
            self.line(r#"<h4 class="font-medium text-blue-800 mb-2">Key Information</h4>"#);
            for (key, value) in &summary {
                let formatted = format_value(self.config, value)?;
                self.line(&format!(
                    r#"<div class="mb-1"><span class="font-medium text-blue-700">{}:</span> {formatted}</div>"#,
                    escape_html(&title_case(key))
                ));
            }
            self.close("</div>");
            wrote_content = true;
        }

        for (category, fields) in categorize(entry, &summary) {
            self.open(r#"<details class="mb-3">"#);
            self.line(&format!(
                r#"<summary class="cursor-pointer font-medium text-gray-700 hover:text-gray-900">{} ({})</summary>"#,
                escape_html(category.label()),
                fields.len()
            ));
            self.open(r#"<div class="mt-2 space-y-2">"#);
            for (key, value) in fields {
                let formatted = format_value(self.config, value)?;
                self.line(&format!(
                    r#"<div class="flex flex-wrap items-start"><span class="font-medium text-gray-600 mr-2">{}:</span><span class="flex-1 min-w-0">{formatted}</span></div>"#,
                    escape_html(&key)
                ));
            }
            self.close("</div>");
            self.close("</details>");
            wrote_content = true;
        }

        if !wrote_content {
            self.line(r#"<div class="text-gray-500 italic">No structured data detected</div>"#);
        }

        let raw = pretty_json(entry, self.config.json_indent)?;
        self.open(r#"<details class="mt-3">"#);
        self.line(r#"<summary class="cursor-pointer text-sm text-gray-500 hover:text-gray-700">Show Raw JSON</summary>"#);
        self.line(&format!(
            r#"<pre class="bg-gray-100 p-3 rounded text-sm overflow-auto text-gray-800 font-mono">{}</pre>"#,
            escape_html(&raw)
        ));
        self.close("</details>");
        Ok(())
    }
}

/// Important keys found on the entry, its `payload` or its `input`, in configured
/// order. The first container holding a key decides its value; null values are
/// dropped.
fn key_information<'c, 'v>(config: &'c ReportConfig, entry: &'v Value) -> Vec<(&'c str, &'v Value)> {
    config
        .important_keys
        .iter()
        .filter_map(|key| {
            let value = entry
                .get(key)
                .or_else(|| entry.get("payload").and_then(|payload| payload.get(key)))
                .or_else(|| entry.get("input").and_then(|input| input.get(key)))?;
            (!value.is_null()).then_some((key.as_str(), value))
        })
        .take(config.summary_limit)
        .collect()
}

/// Top-level fields not already in the summary, grouped by category. Empty
/// categories are left out.
fn categorize<'v>(entry: &'v Value, summary: &[(&str, &Value)]) -> Vec<(Category, Vec<(String, &'v Value)>)> {
    let pairs = entry.as_dict().unwrap_or(&[]);
    let mut groups: Vec<(Category, Vec<(String, &'v Value)>)> =
        Category::ALL.iter().map(|category| (*category, Vec::new())).collect();

    for (key, value) in pairs {
        let key = key.key_text();
        if summary
            .iter()
            .any(|(shown, _)| shown.eq_ignore_ascii_case(&key))
        {
            continue;
        }
        let category = Category::of(value);
        if let Some((_, fields)) = groups.iter_mut().find(|(c, _)| *c == category) {
            fields.push((key, value));
        }
    }

    groups.retain(|(_, fields)| !fields.is_empty());
    groups
}

/// Inline rendering of a collection member.
fn inline_item(value: &Value) -> String {
    match value {
        Value::Str(text) | Value::Object(text) => format!("\"{text}\""),
        other => other.to_string(),
    }
}

fn format_value(config: &ReportConfig, value: &Value) -> Result<String, FormatError> {
    let html = match value {
        Value::Str(text) | Value::Object(text) => {
            if text.chars().count() > config.long_text_threshold {
                let truncated: String = text.chars().take(config.long_text_threshold).collect();
                format!(
                    r#"<div><div class="text-gray-800">{}...</div><details class="mt-1"><summary class="cursor-pointer text-sm text-blue-600 hover:text-blue-700">Show full text</summary><div class="mt-1 p-2 bg-gray-50 rounded text-sm whitespace-pre-wrap">{}</div></details></div>"#,
                    escape_html(&truncated),
                    escape_html(text)
                )
            } else {
                format!(r#"<span class="text-gray-800">{}</span>"#, escape_html(text))
            }
        }
        Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
            if items.is_empty() {
                r#"<span class="text-gray-500 italic">Empty array</span>"#.to_string()
            } else if items.len() <= config.inline_array_limit {
                let inline: Vec<_> = items.iter().map(inline_item).collect();
                format!(
                    r#"<span class="text-gray-800">[{}]</span>"#,
                    escape_html(&inline.join(", "))
                )
            } else {
                let preview: Vec<_> = items
                    .iter()
                    .take(config.inline_array_limit)
                    .map(inline_item)
                    .collect();
                format!(
                    r#"<div><span class="text-gray-600">Array ({} items): [{}, ...]</span><details class="mt-1"><summary class="cursor-pointer text-sm text-blue-600 hover:text-blue-700">Show all items</summary><pre class="mt-1 bg-gray-50 p-2 rounded text-sm overflow-auto">{}</pre></details></div>"#,
                    items.len(),
                    escape_html(&preview.join(", ")),
                    escape_html(&pretty_json(value, 2)?)
                )
            }
        }
        Value::Dict(pairs) => {
            if pairs.is_empty() {
                r#"<span class="text-gray-500 italic">Empty object</span>"#.to_string()
            } else if pairs.len() <= config.inline_object_limit {
                let inline: Vec<_> = pairs
                    .iter()
                    .map(|(key, member)| match member {
                        Value::Str(text) if text.chars().count() < config.inline_string_limit => {
                            format!("{}: \"{text}\"", key.key_text())
                        }
                        other => format!("{}: {}", key.key_text(), other.type_name()),
                    })
                    .collect();
                format!(
                    r#"<span class="text-gray-800">{{{}}}</span>"#,
                    escape_html(&inline.join(", "))
                )
            } else {
                format!(
                    r#"<div><span class="text-gray-600">Object ({} fields)</span><details class="mt-1"><summary class="cursor-pointer text-sm text-blue-600 hover:text-blue-700">Expand object</summary><pre class="mt-1 bg-gray-50 p-2 rounded text-sm overflow-auto">{}</pre></details></div>"#,
                    pairs.len(),
                    escape_html(&pretty_json(value, 2)?)
                )
            }
        }
        Value::Bool(flag) => {
            let color = if *flag { "text-green-600" } else { "text-red-600" };
            format!(r#"<span class="{color} font-medium">{value}</span>"#)
        }
        Value::Int(_) | Value::Float(_) => {
            format!(r#"<span class="text-purple-600 font-medium">{value}</span>"#)
        }
        Value::Null => format!(r#"<span class="text-gray-600">{value}</span>"#),
    };
    Ok(html)
}
