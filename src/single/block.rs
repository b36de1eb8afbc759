//! Subject blocks for single-class scheduling.
//!
//! Classifies input subject rows into blocks with packing kinds, validates
//! the per-category configuration rules, and merges the library and
//! mentoring rows into one combined block placed as an adjacent pair.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{SubjectCategory, SubjectRequest};

/// Packing kind of a subject block.
///
/// Decides which weekly-period partitions are legal and which extra
/// placement rules apply (per-day caps, paired labels). The variant order
/// doubles as the deterministic tiebreak when equally sized sub-blocks are
/// ordered for placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockKind {
    /// Laboratory: prefers 2-period blocks, may fall back to one long run.
    Lab,
    /// Open elective: exactly two 2-period blocks.
    OpenElective,
    /// Project: exactly two 2-period blocks.
    Project,
    /// The merged library+mentoring pair: one 2-period block, two labels.
    LibraryMentoring,
    /// Main subject: free partitioning, at most 3 periods per day.
    Main,
    /// Professional elective: same rules as a main subject.
    ProfessionalElective,
    /// A leftover library row (when more than one was supplied).
    Library,
    /// A leftover mentoring row (when more than one was supplied).
    Mentoring,
    /// Anything else: free partitioning, no per-day cap.
    Other,
}

impl BlockKind {
    /// Whether the same-subject-per-day cap of 3 periods applies.
    pub fn capped_per_day(self) -> bool {
        matches!(self, BlockKind::Main | BlockKind::ProfessionalElective)
    }
}

/// One subject's full weekly commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectBlock {
    /// Subject label (combined "lib/ment" for the merged pair).
    pub subject: String,
    /// Staff label (combined "a/b" for the merged pair).
    pub staff: String,
    /// Total weekly periods to place.
    pub periods: u32,
    /// Packing kind.
    pub kind: BlockKind,
    /// For the merged pair: the two labels in placement order
    /// (library subject first, mentoring subject second).
    pub pairing: Option<(String, String)>,
}

/// Builds validated subject blocks from input rows.
///
/// Category rules checked here, before any search:
/// - a laboratory needs at least 2 weekly periods;
/// - open electives and projects need exactly 4 (placed 2+2);
/// - library and mentoring rows take exactly 1 period each and must both
///   be present; the first of each merges into a combined 2-period block.
///   Additional rows of either kind keep their own kind and partition like
///   ordinary subjects.
pub fn build_blocks(subjects: &[SubjectRequest]) -> Result<Vec<SubjectBlock>, EngineError> {
    let mut blocks = Vec::with_capacity(subjects.len());
    for s in subjects {
        let kind = classify(s)?;
        blocks.push(SubjectBlock {
            subject: s.subject.clone(),
            staff: s.staff.clone(),
            periods: s.periods_per_week,
            kind,
            pairing: None,
        });
    }
    merge_library_mentoring(blocks)
}

fn classify(s: &SubjectRequest) -> Result<BlockKind, EngineError> {
    let p = s.periods_per_week;
    match s.category {
        SubjectCategory::Laboratory => {
            if p < 2 {
                return Err(EngineError::LabTooShort {
                    subject: s.subject.clone(),
                    periods: p,
                });
            }
            Ok(BlockKind::Lab)
        }
        SubjectCategory::OpenElective => {
            if p != 4 {
                return Err(EngineError::OpenElectiveNotTwoPlusTwo {
                    subject: s.subject.clone(),
                    periods: p,
                });
            }
            Ok(BlockKind::OpenElective)
        }
        SubjectCategory::Project => {
            if p != 4 {
                return Err(EngineError::ProjectNotTwoPlusTwo {
                    subject: s.subject.clone(),
                    periods: p,
                });
            }
            Ok(BlockKind::Project)
        }
        SubjectCategory::Library | SubjectCategory::Mentoring => {
            if p != 1 {
                return Err(EngineError::PairedSubjectPeriods {
                    subject: s.subject.clone(),
                    periods: p,
                });
            }
            Ok(if s.category == SubjectCategory::Library {
                BlockKind::Library
            } else {
                BlockKind::Mentoring
            })
        }
        SubjectCategory::MainSubject => Ok(BlockKind::Main),
        SubjectCategory::ProfessionalElective => Ok(BlockKind::ProfessionalElective),
        SubjectCategory::Other => Ok(BlockKind::Other),
    }
}

/// Merges the first library and first mentoring block into one combined
/// 2-period block carrying both labels. One without the other is a
/// configuration error, not a silent default.
fn merge_library_mentoring(
    mut blocks: Vec<SubjectBlock>,
) -> Result<Vec<SubjectBlock>, EngineError> {
    let lib = blocks.iter().position(|b| b.kind == BlockKind::Library);
    let ment = blocks.iter().position(|b| b.kind == BlockKind::Mentoring);

    match (lib, ment) {
        (Some(li), Some(mi)) => {
            // Remove the later index first so the earlier one stays valid.
            let (first, second) = if li < mi { (li, mi) } else { (mi, li) };
            let b2 = blocks.remove(second);
            let b1 = blocks.remove(first);
            let (lib_b, ment_b) = if b1.kind == BlockKind::Library {
                (b1, b2)
            } else {
                (b2, b1)
            };
            blocks.push(SubjectBlock {
                subject: format!("{}/{}", lib_b.subject, ment_b.subject),
                staff: format!("{}/{}", lib_b.staff, ment_b.staff),
                periods: 2,
                kind: BlockKind::LibraryMentoring,
                pairing: Some((lib_b.subject, ment_b.subject)),
            });
            Ok(blocks)
        }
        (None, None) => Ok(blocks),
        _ => Err(EngineError::UnpairedLibraryMentoring),
    }
}
