//! Atom response decoding.
//!
//! The arXiv API answers every listing request with an Atom document. Each
//! `entry` element becomes one [`PaperSummary`]; the OpenSearch elements at
//! feed level describe the page as a whole.
//!
//! Decoding walks the document with a streaming `quick-xml` reader and keeps a
//! stack of open element names, so a field is recognised by its parent (an
//! entry's `id` is the paper link, the feed's `id` is not). Namespace prefixes
//! are ignored by matching on local names.
//!
//! # Example
//!
//! ```
//! use scholarly::feed::decode_feed;
//!
//! let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
//!   <entry>
//!     <id>http://arxiv.org/abs/2301.07041v2</id>
//!     <title>Verifiable Fully Homomorphic Encryption</title>
//!     <author><name>Alexander Viand</name></author>
//!   </entry>
//! </feed>"#;
//!
//! let page = decode_feed(xml.as_bytes()).unwrap();
//! assert_eq!(page.entries.len(), 1);
//! assert_eq!(page.entries[0].authors, vec!["Alexander Viand".to_string()]);
//! ```

use quick_xml::{
  events::{BytesStart, Event},
  Reader,
};

use super::*;

lazy_static! {
  /// Runs of whitespace, including the line breaks arXiv puts inside titles.
  static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Marker arXiv uses in the `id` of the entry it returns for a rejected query.
const API_ERROR_MARKER: &str = "/api/errors";

/// One decoded response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
  /// Papers in the order arXiv listed them
  pub entries:        Vec<PaperSummary>,
  /// `opensearch:totalResults`, the size of the whole result set
  pub total_results:  Option<u64>,
  /// `opensearch:startIndex`, the offset of the first entry
  pub start_index:    Option<u64>,
  /// `opensearch:itemsPerPage`, the page size arXiv honoured
  pub items_per_page: Option<u64>,
}

impl Page {
  /// Number of entries on this page.
  pub fn len(&self) -> usize { self.entries.len() }

  /// Whether the page has no entries.
  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// Fields collected for the entry currently being read.
#[derive(Default)]
struct EntryBuilder {
  /// Title text
  title:            String,
  /// Author names in document order
  authors:          Vec<String>,
  /// Summary text
  abstract_text:    String,
  /// Raw `published` timestamp
  published:        Option<String>,
  /// Entry `id`
  link:             String,
  /// `href` of the link titled "pdf"
  pdf_url:          Option<String>,
  /// `term` of `arxiv:primary_category`
  primary_category: Option<String>,
}

impl EntryBuilder {
  /// Finishes the entry, parsing the timestamp.
  fn build(self) -> PaperSummary {
    let published = self.published.and_then(|raw| match DateTime::parse_from_rfc3339(&raw) {
      Ok(dt) => Some(dt.with_timezone(&Utc)),
      Err(e) => {
        warn!("Ignoring invalid published date {:?} for {}: {}", raw, self.link, e);
        None
      },
    });

    PaperSummary {
      title: self.title,
      authors: self.authors,
      abstract_text: self.abstract_text,
      published,
      link: self.link,
      pdf_url: self.pdf_url,
      primary_category: self.primary_category,
      origin: None,
    }
  }
}

/// Decodes an arXiv Atom response into a [`Page`].
///
/// # Errors
///
/// - [`ScholarlyError::Xml`] if the markup is malformed
/// - [`ScholarlyError::Decode`] if the document is not an Atom feed, or ends
///   inside an open element
/// - [`ScholarlyError::Api`] if arXiv answered with its error entry
pub fn decode_feed(data: &[u8]) -> Result<Page> {
  let mut reader = Reader::from_reader(data);
  let mut buf = Vec::new();

  let mut page = Page::default();
  let mut stack: Vec<String> = Vec::new();
  let mut text = String::new();
  let mut entry: Option<EntryBuilder> = None;
  let mut saw_feed = false;

  loop {
    match reader.read_event_into(&mut buf)? {
      Event::Start(e) => {
        let name = local_name(&e);
        match name.as_str() {
          "feed" if stack.is_empty() => saw_feed = true,
          "entry" => entry = Some(EntryBuilder::default()),
          _ => (),
        }
        if let Some(builder) = entry.as_mut() {
          read_attributes(&e, &name, builder)?;
        }
        stack.push(name);
        text.clear();
      },
      Event::Empty(e) =>
        if let Some(builder) = entry.as_mut() {
          read_attributes(&e, &local_name(&e), builder)?;
        },
      Event::Text(e) => text.push_str(&e.unescape()?),
      Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
      Event::End(_) => {
        let Some(name) = stack.pop() else {
          return Err(ScholarlyError::Decode("unbalanced closing tag".to_string()));
        };
        let parent = stack.last().map(String::as_str);
        let value = std::mem::take(&mut text);

        if name == "entry" {
          if let Some(builder) = entry.take() {
            let paper = builder.build();
            if paper.link.contains(API_ERROR_MARKER) {
              let message =
                if paper.abstract_text.is_empty() { paper.title } else { paper.abstract_text };
              return Err(ScholarlyError::Api(message));
            }
            page.entries.push(paper);
          }
        } else if let Some(builder) = entry.as_mut() {
          match (name.as_str(), parent) {
            ("title", Some("entry")) => builder.title = normalize_whitespace(&value),
            ("summary", Some("entry")) => builder.abstract_text = normalize_whitespace(&value),
            ("published", Some("entry")) => builder.published = Some(value.trim().to_string()),
            ("id", Some("entry")) => builder.link = value.trim().to_string(),
            ("name", Some("author")) => {
              let author = normalize_whitespace(&value);
              if !author.is_empty() {
                builder.authors.push(author);
              }
            },
            _ => (),
          }
        } else {
          match (name.as_str(), parent) {
            ("totalResults", Some("feed")) => page.total_results = parse_count(&value),
            ("startIndex", Some("feed")) => page.start_index = parse_count(&value),
            ("itemsPerPage", Some("feed")) => page.items_per_page = parse_count(&value),
            _ => (),
          }
        }
      },
      Event::Eof => break,
      _ => (),
    }
    buf.clear();
  }

  if let Some(open) = stack.last() {
    return Err(ScholarlyError::Decode(format!("document ended inside <{open}>")));
  }
  if !saw_feed {
    return Err(ScholarlyError::Decode("response is not an Atom feed".to_string()));
  }

  debug!("Decoded {} entries (total results: {:?})", page.entries.len(), page.total_results);
  Ok(page)
}

/// Collapses whitespace runs to single spaces and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
  WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Element name without its namespace prefix.
fn local_name(e: &BytesStart) -> String {
  String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Picks up the attribute-carried entry fields: the PDF link and the primary category.
fn read_attributes(e: &BytesStart, name: &str, builder: &mut EntryBuilder) -> Result<()> {
  match name {
    "link" => {
      let is_pdf = match e.try_get_attribute("title")? {
        Some(attr) => attr.unescape_value()? == "pdf",
        None => false,
      };
      if is_pdf {
        if let Some(href) = e.try_get_attribute("href")? {
          builder.pdf_url = Some(href.unescape_value()?.into_owned());
        }
      }
    },
    "primary_category" =>
      if let Some(term) = e.try_get_attribute("term")? {
        builder.primary_category = Some(term.unescape_value()?.into_owned());
      },
    _ => (),
  }
  Ok(())
}

/// Parses an OpenSearch counter, ignoring garbage.
fn parse_count(value: &str) -> Option<u64> {
  let count = value.trim().parse().ok();
  if count.is_none() {
    trace!("Ignoring non-numeric OpenSearch value {:?}", value);
  }
  count
}
