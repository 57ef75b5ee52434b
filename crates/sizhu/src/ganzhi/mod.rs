pub mod cycle;
pub mod hidden;
pub mod ten_gods;
pub mod types;

pub use cycle::{index_to_pair, pair_to_index, symbols_to_index, GanZhi, JIAZI_CYCLE_LEN};
pub use hidden::{branch_contains_stem, hidden_stems, primary_hidden_stem, HiddenStem, HiddenStemWeight};
pub use ten_gods::{ten_god, TenGod};
pub use types::{branch_modulo, stem_modulo, Branch, Element, Polarity, Stem, BRANCHES, STEMS};
