//! Generated code regions.
//!
//! A transformed file is four regions: header, postHeader, body, footer.
//! Rewriting appends lines to the three generated regions in any order it
//! needs; [`assemble`] is the only place that decides the final layout.

/// Ordered line list for one generated region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    lines: Vec<String>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    /// Region seeded with template text. Empty templates give an empty region.
    pub fn seeded(template: &str) -> Self {
        let mut region = Region::new();
        if !template.is_empty() {
            region.lines.extend(template.split('\n').map(str::to_string));
        }
        region
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains_line(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    /// Replace the first occurrence of `placeholder` across all lines.
    pub fn substitute_once(&mut self, placeholder: &str, value: &str) -> bool {
        for line in &mut self.lines {
            if line.contains(placeholder) {
                *line = line.replacen(placeholder, value, 1);
                return true;
            }
        }
        false
    }

    /// Joined, trimmed text of the region.
    pub fn render(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regions {
    pub header: Region,
    pub post_header: Region,
    pub footer: Region,
}

impl Regions {
    pub fn from_templates(header: &str, post_header: &str) -> Self {
        Regions {
            header: Region::seeded(header),
            post_header: Region::seeded(post_header),
            footer: Region::new(),
        }
    }

    pub fn assemble(&self, body: &str) -> String {
        assemble(
            &self.header.render(),
            &self.post_header.render(),
            body,
            &self.footer.render(),
        )
    }
}

/// Layout: header, postHeader, body, footer, each separated by one blank
/// line, empty regions skipped, one trailing newline.
pub fn assemble(header: &str, post_header: &str, body: &str, footer: &str) -> String {
    let header = header.trim();
    let post_header = post_header.trim();
    let footer = footer.trim();

    let mut text = body.trim().to_string();

    if !post_header.is_empty() {
        text = format!("{}\n\n{}", post_header, text);
    }
    if !header.is_empty() {
        text = format!("{}\n\n{}", header, text);
    }
    if !footer.is_empty() {
        text.push_str("\n\n");
        text.push_str(footer);
    }

    text.push('\n');
    text
}
