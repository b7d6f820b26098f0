//! Built-in panel models
//!
//! Each model is a `'static` [`PanelDescriptor`]; [`find`] resolves a
//! devicetree compatible string to one of them.

use crate::config::PanelDescriptor;
use crate::error::BuilderError;

mod ili9881d;
mod st7785;

pub use ili9881d::{ETML050015DHA, YB_TG7201280S03A};
pub use st7785::ET0240H6DMA;

/// Every built-in descriptor
pub const PANELS: &[&PanelDescriptor] = &[&ET0240H6DMA, &ETML050015DHA, &YB_TG7201280S03A];

/// Look up a built-in descriptor by compatible string
///
/// # Errors
///
/// Returns `BuilderError::UnknownCompatible` if no descriptor matches.
pub fn find(compatible: &str) -> Result<&'static PanelDescriptor, BuilderError> {
    PANELS
        .iter()
        .copied()
        .find(|desc| desc.compatible == compatible)
        .ok_or(BuilderError::UnknownCompatible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Instruction;

    #[test]
    fn test_find_each_compatible() {
        assert_eq!(find("et0240h6dma,st7785").unwrap().name, "ET0240H6DMA");
        assert_eq!(
            find("surelink,etml050015dha").unwrap().name,
            "ETML050015DHA"
        );
        assert_eq!(
            find("surelink,yb_tg7201280s03a").unwrap().name,
            "YB-TG7201280S03A"
        );
    }

    #[test]
    fn test_find_unknown() {
        assert_eq!(find("surelink,etml050015"), Err(BuilderError::UnknownCompatible));
        assert_eq!(find(""), Err(BuilderError::UnknownCompatible));
    }

    #[test]
    fn test_compatibles_are_unique() {
        for (i, a) in PANELS.iter().enumerate() {
            for b in &PANELS[i + 1..] {
                assert_ne!(a.compatible, b.compatible);
            }
        }
    }

    #[test]
    fn test_paged_tables_end_on_page_zero() {
        for desc in PANELS.iter().filter(|d| d.init.page_select.is_some()) {
            let last_page = desc.init.table.iter().rev().find_map(|i| match i {
                Instruction::SwitchPage(page) => Some(*page),
                _ => None,
            });
            assert_eq!(last_page, Some(0), "{}", desc.name);
        }
    }

    #[test]
    fn test_unpaged_tables_have_no_page_switch() {
        for desc in PANELS.iter().filter(|d| d.init.page_select.is_none()) {
            assert!(
                !desc
                    .init
                    .table
                    .iter()
                    .any(|i| matches!(i, Instruction::SwitchPage(_))),
                "{}",
                desc.name
            );
        }
    }
}
