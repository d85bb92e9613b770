//! # teiclean
//!
//! Strip editorial and structural markup from TEI XML documents, keeping the
//! text and a reduced skeleton of containers.
//!
//! ## What the cleaning does
//!
//! - `teiHeader` is copied untouched
//! - containers (`text`, `body`, `div`, `p`, `lg`, `head`, `speaker`, ...)
//!   are kept and their content cleaned
//! - `sp` becomes `ab`
//! - `lb`, `pb`, `figure`, `fw` and `gap` are removed, and so is a `p`
//!   nested inside another `p`
//! - text of `title` is kept only inside a `p` or `l`; text of `note` is
//!   dropped
//! - anything else is copied as-is
//!
//! The full rule order lives in [`rules::tei`].
//!
//! ## Quick Start
//!
//! ```
//! use teiclean::{CleanOptions, ParseOptions, SerializeOptions, clean, parse_str, to_string};
//!
//! let input = parse_str(
//!     "<body><sp><speaker>A</speaker><p>Hel<lb/>lo</p></sp><pb/></body>",
//!     &ParseOptions::default(),
//! )
//! .unwrap();
//! let cleaned = clean(&input, &CleanOptions::default());
//!
//! assert_eq!(
//!     to_string(&cleaned.document, &SerializeOptions::compact()),
//!     "<body><ab><speaker>A</speaker><p>Hello</p></ab></body>"
//! );
//! ```
//!
//! Files go through [`clean_file`]:
//!
//! ```no_run
//! use teiclean::{CleanOptions, SerializeOptions, clean_file};
//!
//! let cleaned = clean_file("play.xml", &CleanOptions::new().with_segmentation(true)).unwrap();
//! cleaned.write("play_clean.xml", &SerializeOptions::default()).unwrap();
//! ```

pub mod clean;
pub mod dom;
pub mod error;
pub mod passes;
pub mod rewrite;
pub mod rules;
pub(crate) mod util;

pub use clean::{CleanOptions, Cleaned, clean, clean_file, clean_str};
pub use dom::parse::{ParseOptions, parse_bytes, parse_str};
pub use dom::serialize::{SerializeOptions, to_string, write_to};
pub use dom::{Attribute, Document, Node, NodeData, NodeId, QName, TEI_NS};
pub use error::{Error, Result};
pub use rewrite::{CleanReport, Rewriter};
pub use rules::{Action, Pattern, Rule, RuleTable};
