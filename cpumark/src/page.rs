use anyhow::Context;
use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;

/// The rendered text of one CPU's specification page.
///
/// The page is flattened into line-like fragments before any field
/// extraction happens: a display name, the summary lines (class, socket,
/// benchmark scores, release quarter), and one string per detail paragraph
/// (cores, threads, clock speeds, TDP). Footnote markers are stripped during
/// flattening so they never leak into field values.
pub struct PageText {
    pub name: String,
    pub lines: Vec<String>,
    pub details: Vec<String>,
}

impl PageText {
    pub fn new(name: &str, lines: &[&str], details: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            lines: lines.iter().map(|s| s.to_string()).collect(),
            details: details.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Flatten a spec page into its text fragments.
    ///
    /// # Errors
    /// Errors if the page has no name header, which means the identifier did
    /// not resolve to a CPU page at all.
    pub fn from_html(html: &str) -> anyhow::Result<Self> {
        let document = kuchiki::parse_html().one(html);

        /* footnote superscripts render into the middle of field values */
        let footnotes: Vec<NodeRef> = document
            .select("sup")
            .map(|sups| sups.map(|s| s.as_node().clone()).collect())
            .unwrap_or_default();
        for node in footnotes {
            node.detach();
        }

        let name = document
            .select_first(".desc-header")
            .ok()
            .context("page has no CPU name header")?
            .as_node()
            .text_contents()
            .trim()
            .to_string();

        let mut lines = Vec::new();
        for selector in &[".left-desc-cpu", ".right-desc"] {
            if let Ok(block) = document.select_first(selector) {
                lines.extend(
                    block
                        .as_node()
                        .text_contents()
                        .lines()
                        .map(|l| l.trim().to_string())
                        .filter(|l| !l.is_empty()),
                );
            }
        }
        if let Ok(alts) = document.select("p.alt") {
            for alt in alts {
                let text = alt.as_node().text_contents().trim().to_string();
                if !text.is_empty() {
                    lines.push(text);
                }
            }
        }

        let mut details = Vec::new();
        if let Ok(paragraphs) = document.select("div.desc-body p") {
            for p in paragraphs {
                details.push(p.as_node().text_contents().trim().to_string());
            }
        }

        Ok(Self {
            name,
            lines,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PageText;

    #[test]
    fn test_from_html() {
        let page = PageText::from_html(
            r#"
            <html><body>
                <div class="desc-header">Intel Core i9-9900K @ 3.60GHz</div>
                <div class="left-desc-cpu">
                    Class: Desktop
                    Socket: FCLGA1151
                </div>
                <div class="right-desc">
                    Average CPU Mark
                    18815
                    Single Thread Rating: 2893
                </div>
                <p class="alt">CPU First Seen on Charts: Q4 2018<sup>1</sup></p>
                <div class="desc-body">
                    <p>Clockspeed: 3.6 GHz</p>
                    <p>Turbo Speed: 5.0 GHz</p>
                    <p>Cores: 8 Threads: 16</p>
                    <p>Typical TDP: 95 W</p>
                </div>
            </body></html>
            "#,
        )
        .unwrap();

        assert_eq!(page.name, "Intel Core i9-9900K @ 3.60GHz");
        assert!(page.lines.iter().any(|l| l == "Class: Desktop"));
        assert!(page.lines.iter().any(|l| l == "Average CPU Mark"));
        /* the <sup> footnote must not survive flattening */
        assert!(page
            .lines
            .iter()
            .any(|l| l == "CPU First Seen on Charts: Q4 2018"));
        assert_eq!(page.details.len(), 4);
        assert_eq!(page.details[2], "Cores: 8 Threads: 16");
    }

    #[test]
    fn test_from_html_without_header() {
        assert!(PageText::from_html("<html><body></body></html>").is_err());
    }
}
