//! Document passes that run around the rule table.
//!
//! 1. **Rejoin** (before cleaning) - undo words split by `lb break="no"`
//! 2. **Segment** (after cleaning) - split paragraph text into `seg` sentences
//! 3. **Orig/reg** (after segmenting) - pair each sentence's original and
//!    regularized readings
//!
//! Both mutate the tree in place and return how many changes they made.

pub mod orig_reg;
pub mod rejoin;
pub mod segment;

pub use orig_reg::add_orig_reg;
pub use rejoin::rejoin_broken_words;
pub use segment::{segment_sentences, split_sentences};
