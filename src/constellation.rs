//! # Constellation Aggregation
//!
//! Within one epoch a receiver sends one GSA sentence per constellation and
//! splits each constellation's satellites-in-view list over several GSV
//! sentences. The [`ConstellationAggregator`] reassembles them into the
//! bounded [`ConstellationSlots`] table.
//!
//! GSV fragments are grouped by talker ID: a fragment whose talker matches the
//! previous GSV talker continues the same constellation, any other talker opens
//! the next system slot. Fragments of one constellation are therefore expected
//! to arrive contiguously.

use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    nmea0183::Talker,
    nmea_content::{GsaRecord, GsvRecord, Satellite},
};

/// Number of constellation slots per epoch.
pub const MAX_SYSTEMS: usize = 3;

/// Number of GSV fragments stored per constellation.
pub const MAX_GSV_PER_SYSTEM: usize = 4;

/// Defines how GSV message numbers are checked against fragment positions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GsvSequencing {
    #[default]
    /// Fragments are placed by arrival order alone.
    ///
    /// A message number that disagrees with the inferred position is logged
    /// and the fragment is stored anyway.
    Positional,

    /// A fragment whose message number disagrees with its inferred position is
    /// rejected with [`Error::FragmentOutOfSequence`].
    Strict,
}

/// The GSV fragments received for one constellation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SystemFragments {
    /// Talker ID shared by all fragments
    pub talker: Talker,
    /// Fragments in arrival order
    pub fragments: heapless::Vec<GsvRecord, MAX_GSV_PER_SYSTEM>,
}

impl SystemFragments {
    /// Iterates over the satellites of all fragments.
    pub fn satellites(&self) -> impl Iterator<Item = &Satellite> {
        self.fragments.iter().flat_map(|gsv| gsv.satellites.iter())
    }

    /// Number of satellites across all fragments.
    pub fn satellite_count(&self) -> usize {
        self.fragments.iter().map(GsvRecord::satellite_count).sum()
    }
}

/// Per-epoch constellation table.
///
/// Slots are filled in arrival order. GSA and GSV slots are numbered
/// independently: `gsa[0]` is the first GSA sentence of the epoch, `gsv[0]` the
/// first GSV constellation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstellationSlots {
    /// One GSA record per system slot
    pub gsa: heapless::Vec<GsaRecord, MAX_SYSTEMS>,
    /// GSV fragments per system slot
    pub gsv: heapless::Vec<SystemFragments, MAX_SYSTEMS>,
}

impl ConstellationSlots {
    /// Returns `true` if no GSA or GSV sentence was stored.
    pub fn is_empty(&self) -> bool {
        self.gsa.is_empty() && self.gsv.is_empty()
    }

    /// Looks up the GSV fragments of a talker.
    pub fn fragments_of(&self, talker: Talker) -> Option<&SystemFragments> {
        self.gsv.iter().find(|system| system.talker == talker)
    }
}

/// Reassembles GSA and GSV records of one epoch into [`ConstellationSlots`].
///
/// # Example
///
/// ```rust
/// use nmea0183_epoch::{ConstellationAggregator, GsvRecord, GsvSequencing, Parsable};
///
/// let mut aggregator = ConstellationAggregator::new(GsvSequencing::Positional);
/// for sentence in [
///     "$GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75",
///     "$GPGSV,2,2,08,15,10,050,30,17,35,120,44,19,05,010,20,22,62,270,48*7A",
///     "$GLGSV,1,1,02,65,34,100,40,72,12,200,35*6C",
/// ] {
///     aggregator.push_gsv(GsvRecord::parse(sentence).unwrap()).unwrap();
/// }
///
/// let slots = aggregator.finish();
/// assert_eq!(slots.gsv[0].fragments.len(), 2);
/// assert_eq!(slots.gsv[1].satellite_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstellationAggregator {
    slots: ConstellationSlots,
    current: Option<Talker>,
    fragment: usize,
    sequencing: GsvSequencing,
}

impl ConstellationAggregator {
    /// Creates an empty aggregator.
    pub fn new(sequencing: GsvSequencing) -> Self {
        ConstellationAggregator {
            sequencing,
            ..Default::default()
        }
    }

    /// Stores a GSA record in the next free system slot.
    ///
    /// # Errors
    ///
    /// [`Error::ConstellationOverflow`] if all [`MAX_SYSTEMS`] slots are taken.
    /// The record is dropped.
    pub fn push_gsa(&mut self, gsa: GsaRecord) -> Result<()> {
        self.slots.gsa.push(gsa).map_err(|gsa| {
            warn!("GSA from {} dropped: all {MAX_SYSTEMS} system slots taken", gsa.talker);
            Error::ConstellationOverflow {
                capacity: MAX_SYSTEMS,
            }
        })
    }

    /// Stores a GSV record as the next fragment of its constellation.
    ///
    /// # Errors
    ///
    /// - [`Error::FragmentOverflow`] if the constellation already holds
    ///   [`MAX_GSV_PER_SYSTEM`] fragments
    /// - [`Error::ConstellationOverflow`] if a new talker appears and all
    ///   [`MAX_SYSTEMS`] slots are taken
    /// - [`Error::FragmentOutOfSequence`] with [`GsvSequencing::Strict`] only
    ///
    /// The record is dropped and the aggregator state is unchanged on error.
    pub fn push_gsv(&mut self, gsv: GsvRecord) -> Result<()> {
        let continues = self.current == Some(gsv.talker);
        let fragment = if continues { self.fragment + 1 } else { 0 };

        if continues && fragment >= MAX_GSV_PER_SYSTEM {
            warn!(
                "GSV from {} dropped: {MAX_GSV_PER_SYSTEM} fragments already stored",
                gsv.talker
            );
            return Err(Error::FragmentOverflow {
                capacity: MAX_GSV_PER_SYSTEM,
            });
        }

        if !continues && self.slots.gsv.is_full() {
            warn!(
                "GSV from {} dropped: all {MAX_SYSTEMS} system slots taken",
                gsv.talker
            );
            return Err(Error::ConstellationOverflow {
                capacity: MAX_SYSTEMS,
            });
        }

        self.check_sequence(&gsv, fragment)?;

        if continues {
            let system = self
                .slots
                .gsv
                .last_mut()
                .ok_or(Error::ConstellationOverflow {
                    capacity: MAX_SYSTEMS,
                })?;
            system
                .fragments
                .push(gsv)
                .map_err(|_| Error::FragmentOverflow {
                    capacity: MAX_GSV_PER_SYSTEM,
                })?;
        } else {
            let talker = gsv.talker;
            let mut fragments = heapless::Vec::new();
            let _ = fragments.push(gsv);
            self.slots
                .gsv
                .push(SystemFragments { talker, fragments })
                .map_err(|_| Error::ConstellationOverflow {
                    capacity: MAX_SYSTEMS,
                })?;
            self.current = Some(talker);
        }

        self.fragment = fragment;
        Ok(())
    }

    fn check_sequence(&self, gsv: &GsvRecord, fragment: usize) -> Result<()> {
        let Some(found) = gsv.message_number.get() else {
            return Ok(());
        };

        let expected = fragment as u8 + 1;
        if found == i32::from(expected) {
            return Ok(());
        }

        match self.sequencing {
            GsvSequencing::Positional => {
                warn!(
                    "GSV from {}: message {found} stored as fragment {expected}",
                    gsv.talker
                );
                Ok(())
            }
            GsvSequencing::Strict => Err(Error::FragmentOutOfSequence {
                expected,
                // Decoded in 1..=9.
                found: found as u8,
            }),
        }
    }

    /// Returns the talker of the constellation currently receiving fragments.
    pub fn current_talker(&self) -> Option<Talker> {
        self.current
    }

    /// Returns the GSV system slot currently receiving fragments.
    pub fn system_index(&self) -> Option<usize> {
        self.slots.gsv.len().checked_sub(1)
    }

    /// Returns the position of the last fragment stored in the current system
    /// slot.
    pub fn fragment_index(&self) -> usize {
        self.fragment
    }

    /// Returns the table built so far.
    pub fn slots(&self) -> &ConstellationSlots {
        &self.slots
    }

    /// Consumes the aggregator, returning the finished table.
    pub fn finish(self) -> ConstellationSlots {
        self.slots
    }
}
