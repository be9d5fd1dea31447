//! Compression pointer resolution, RFC 1035 section 4.1.4.
//!
//! While a message is decoded every label sequence is recorded by the offset
//! it starts at (the primary map), and every individual label by its own
//! offset (the secondary map, pointing at a position inside a primary
//! sequence). A pointer to any of those offsets then expands to the suffix of
//! the primary sequence starting at that position, without walking the bytes
//! again. Pointers that themselves were the target of resolution are
//! registered too, so chains of pointers resolve in one lookup.

use std::collections::HashMap;

use crate::error::DecodeError;
use crate::name::{DecodedLabel, ParsedDomainName, ValueLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SecondaryPointer {
    primary_offset: usize,
    label_index: usize,
}

/// Scoped to the decoding of a single message.
#[derive(Debug, Default)]
pub struct LabelOffsetTable {
    primary: HashMap<usize, Vec<ValueLabel>>,
    secondary: HashMap<usize, SecondaryPointer>,
}

impl LabelOffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The expanded labels a pointer to `pointer` denotes, if anything was
    /// recorded there.
    pub fn get_by_pointer(&self, pointer: usize) -> Option<&[ValueLabel]> {
        let secondary = self.secondary.get(&pointer)?;
        let labels = self.primary.get(&secondary.primary_offset)?;
        labels.get(secondary.label_index..)
    }

    /// Records an already expanded label sequence that starts at `start_offset`.
    pub fn put_labels(&mut self, start_offset: usize, labels: Vec<ValueLabel>) {
        for (label_index, label) in labels.iter().enumerate() {
            self.secondary.insert(
                label.offset,
                SecondaryPointer {
                    primary_offset: start_offset,
                    label_index,
                },
            );
        }

        self.primary.insert(start_offset, labels);
    }

    /// Records `domain_name` and returns its labels with the trailing pointer,
    /// if any, replaced by the labels it refers to.
    pub fn put(&mut self, domain_name: &ParsedDomainName) -> Result<Vec<ValueLabel>, DecodeError> {
        let mut own_labels = Vec::new();
        let mut suffix: &[ValueLabel] = &[];

        for label in &domain_name.labels {
            match label {
                DecodedLabel::Value(value) => own_labels.push(value.clone()),
                DecodedLabel::Pointer { offset, target } => {
                    if target >= offset {
                        return Err(DecodeError::MalformedPointer {
                            offset: *offset,
                            reason: "pointer does not refer to an earlier offset",
                        });
                    }

                    let secondary = *self.secondary.get(target).ok_or(
                        DecodeError::UnknownPointerTarget {
                            offset: *offset,
                            target: *target,
                        },
                    )?;
                    // the pointer's own offset now aliases the same suffix
                    self.secondary.insert(*offset, secondary);

                    suffix = self
                        .get_by_pointer(*target)
                        .ok_or(DecodeError::UnknownPointerTarget {
                            offset: *offset,
                            target: *target,
                        })?;
                    break;
                }
            }
        }

        let own_count = own_labels.len();
        let mut expanded = own_labels;
        expanded.extend_from_slice(suffix);

        // only this name's own labels point into its sequence; the suffix
        // labels keep pointing at the sequence they were first seen in
        for (label_index, label) in expanded.iter().take(own_count).enumerate() {
            self.secondary.insert(
                label.offset,
                SecondaryPointer {
                    primary_offset: domain_name.start_offset,
                    label_index,
                },
            );
        }
        self.primary
            .insert(domain_name.start_offset, expanded.clone());

        Ok(expanded)
    }
}
