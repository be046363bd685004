//! # Epoch Buffer
//!
//! An [`EpochBuffer`] is one decoding session. Raw sentences are appended as
//! they arrive; at the end of each navigation epoch a single
//! [`commit`](EpochBuffer::commit) decodes everything accumulated, builds a
//! private preview and publishes it as the new [`EpochSnapshot`].
//!
//! Readers only ever see whole snapshots: the swap from preview to published
//! snapshot is the one place a lock is taken, and decoding itself never
//! touches shared state.

use std::sync::{Arc, RwLock};

use log::{debug, trace, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    constellation::{ConstellationAggregator, ConstellationSlots, GsvSequencing},
    nmea0183::{ChecksumMode, type_code},
    nmea_content::{GgaRecord, GllRecord, NmeaSentence, RmcRecord, VtgRecord, ZdaRecord},
    parsing::Tokenizer,
};

/// Default capacity of the raw sentence buffer, in bytes.
pub const DEFAULT_CAPACITY: usize = 1024;

/// The decoded state of one epoch, as published by [`EpochBuffer::commit`].
///
/// Records not seen during an epoch keep the value of the previous snapshot.
/// The constellation table is rebuilt from scratch every epoch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpochSnapshot {
    /// Number of commits that produced this snapshot, `0` before the first one
    pub epoch: u64,
    /// Latest GGA record
    pub gga: GgaRecord,
    /// Latest GLL record
    pub gll: GllRecord,
    /// Latest RMC record
    pub rmc: RmcRecord,
    /// Latest VTG record
    pub vtg: VtgRecord,
    /// Latest ZDA record
    pub zda: ZdaRecord,
    /// GSA and GSV data of this epoch
    pub constellations: ConstellationSlots,
}

/// A sentence that could not be used during a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    /// Position of the sentence in the epoch, starting at `0`
    pub index: usize,
    /// Why the sentence was rejected
    pub error: Error,
}

/// Diagnostics of the latest commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Sentences found in the buffer
    pub sentences: usize,
    /// Sentences decoded and stored in the snapshot
    pub decoded: usize,
    /// Sentences of unsupported types, skipped without error
    pub skipped: usize,
    /// Sentences rejected by a structural or capacity error
    pub rejections: Vec<Rejection>,
}

/// A cloneable reader of the snapshots published by one [`EpochBuffer`].
///
/// Handles can be sent to other threads; each [`load`](SnapshotHandle::load)
/// returns the most recently published snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    published: Arc<RwLock<Arc<EpochSnapshot>>>,
}

impl SnapshotHandle {
    /// Returns the currently published snapshot.
    ///
    /// # Errors
    ///
    /// [`Error::SnapshotPoisoned`] if a thread panicked while holding the lock.
    pub fn load(&self) -> Result<Arc<EpochSnapshot>> {
        let guard = self.published.read().map_err(|_| Error::SnapshotPoisoned)?;
        Ok(Arc::clone(&guard))
    }
}

/// Builder for [`EpochBuffer`].
///
/// ```rust
/// use nmea0183_epoch::{ChecksumMode, EpochBufferBuilder, GsvSequencing};
///
/// let buffer = EpochBufferBuilder::new()
///     .capacity(2048)
///     .checksum_mode(ChecksumMode::Verify)
///     .gsv_sequencing(GsvSequencing::Strict)
///     .build();
/// assert_eq!(buffer.capacity(), 2048);
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct EpochBufferBuilder {
    /// Raw buffer capacity in bytes.
    capacity: usize,

    /// Checksum handling for every sentence.
    checksum_mode: ChecksumMode,

    /// GSV message number handling.
    gsv_sequencing: GsvSequencing,
}

impl EpochBufferBuilder {
    /// Creates a new builder with default settings.
    ///
    /// The default settings are:
    /// - Capacity: [`DEFAULT_CAPACITY`]
    /// - Checksum mode: [`ChecksumMode::Ignore`]
    /// - GSV sequencing: [`GsvSequencing::Positional`]
    pub fn new() -> Self {
        EpochBufferBuilder {
            capacity: DEFAULT_CAPACITY,
            checksum_mode: ChecksumMode::Ignore,
            gsv_sequencing: GsvSequencing::Positional,
        }
    }

    /// Sets the raw buffer capacity in bytes, including one terminator per
    /// sentence.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the checksum handling.
    ///
    /// # Arguments
    ///
    /// * `mode` - The desired checksum mode:
    ///   - [`ChecksumMode::Ignore`]: Only the `*` delimiter must be present
    ///   - [`ChecksumMode::Verify`]: The checksum must match the content
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the GSV message number handling.
    pub fn gsv_sequencing(mut self, sequencing: GsvSequencing) -> Self {
        self.gsv_sequencing = sequencing;
        self
    }

    /// Builds an empty session with the configured settings.
    pub fn build(self) -> EpochBuffer {
        EpochBuffer {
            buffer: String::with_capacity(self.capacity),
            capacity: self.capacity,
            checksum_mode: self.checksum_mode,
            gsv_sequencing: self.gsv_sequencing,
            published: Arc::new(RwLock::new(Arc::new(EpochSnapshot::default()))),
            report: CommitReport::default(),
        }
    }
}

impl Default for EpochBufferBuilder {
    fn default() -> Self {
        EpochBufferBuilder::new()
    }
}

/// One decoding session: the raw sentence buffer and the published snapshot.
///
/// # Example
///
/// ```rust
/// use nmea0183_epoch::EpochBuffer;
///
/// let mut session = EpochBuffer::new();
/// session.append("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47").unwrap();
/// session.append("$GPTXT,01,01,02,ANTSTATUS=OK*3B").unwrap();
///
/// let snapshot = session.commit().unwrap();
/// assert_eq!(snapshot.epoch, 1);
/// assert_eq!(snapshot.gga.satellites_used.get(), Some(8));
/// assert_eq!(session.last_report().skipped, 1);
/// assert!(session.is_empty());
/// ```
#[derive(Debug)]
pub struct EpochBuffer {
    buffer: String,
    capacity: usize,
    checksum_mode: ChecksumMode,
    gsv_sequencing: GsvSequencing,
    published: Arc<RwLock<Arc<EpochSnapshot>>>,
    report: CommitReport,
}

impl EpochBuffer {
    /// Creates a session with default settings (see [`EpochBufferBuilder::new`]).
    pub fn new() -> Self {
        EpochBufferBuilder::new().build()
    }

    /// Creates a builder for a customized session.
    pub fn builder() -> EpochBufferBuilder {
        EpochBufferBuilder::new()
    }

    /// Appends one sentence and its terminator to the buffer.
    ///
    /// # Errors
    ///
    /// [`Error::BufferFull`] if the sentence and its terminator do not fit. The
    /// buffer is left unchanged.
    pub fn append(&mut self, sentence: &str) -> Result<()> {
        let requested = sentence.len() + 1;
        let available = self.capacity.saturating_sub(self.buffer.len());

        if requested > available {
            warn!("epoch buffer full: {requested} bytes requested, {available} available");
            return Err(Error::BufferFull {
                requested,
                available,
            });
        }

        self.buffer.push_str(sentence);
        self.buffer.push('\n');
        trace!("appended {:?} ({} bytes used)", sentence, self.buffer.len());

        Ok(())
    }

    /// Decodes the buffered sentences and publishes them as the next snapshot.
    ///
    /// Sentences of unsupported types are skipped. A sentence rejected by a
    /// structural or capacity error is recorded in [`EpochBuffer::last_report`]
    /// and the remaining sentences are still decoded. On success the buffer is
    /// emptied.
    ///
    /// Committing an empty buffer publishes nothing and returns the current
    /// snapshot.
    ///
    /// # Errors
    ///
    /// [`Error::SnapshotPoisoned`] if the snapshot lock is poisoned. Nothing is
    /// published and the buffer is kept.
    pub fn commit(&mut self) -> Result<Arc<EpochSnapshot>> {
        let published = self.snapshot()?;

        if self.buffer.is_empty() {
            debug!("empty commit, snapshot {} unchanged", published.epoch);
            self.report = CommitReport::default();
            return Ok(published);
        }

        let mut preview = EpochSnapshot {
            epoch: published.epoch + 1,
            constellations: ConstellationSlots::default(),
            ..EpochSnapshot::clone(&published)
        };
        let mut aggregator = ConstellationAggregator::new(self.gsv_sequencing);
        let mut report = CommitReport::default();

        for (index, sentence) in Tokenizer::new(&self.buffer, '\n').enumerate() {
            report.sentences += 1;

            let stored = NmeaSentence::parse_with(sentence, self.checksum_mode).and_then(|decoded| {
                trace!("routing {} sentence #{index}", decoded.sentence_type());
                match decoded {
                    NmeaSentence::Gga(gga) => preview.gga = gga,
                    NmeaSentence::Gll(gll) => preview.gll = gll,
                    NmeaSentence::Rmc(rmc) => preview.rmc = rmc,
                    NmeaSentence::Vtg(vtg) => preview.vtg = vtg,
                    NmeaSentence::Zda(zda) => preview.zda = zda,
                    NmeaSentence::Gsa(gsa) => aggregator.push_gsa(gsa)?,
                    NmeaSentence::Gsv(gsv) => aggregator.push_gsv(gsv)?,
                }
                Ok(())
            });

            match stored {
                Ok(()) => report.decoded += 1,
                Err(Error::UnrecognizedSentence) => {
                    debug!(
                        "skipping sentence #{index} of type {:?}",
                        type_code(sentence).unwrap_or_default()
                    );
                    report.skipped += 1;
                }
                Err(error) => {
                    warn!("sentence #{index} rejected: {error}");
                    report.rejections.push(Rejection { index, error });
                }
            }
        }

        preview.constellations = aggregator.finish();
        let preview = Arc::new(preview);

        {
            let mut guard = self
                .published
                .write()
                .map_err(|_| Error::SnapshotPoisoned)?;
            *guard = Arc::clone(&preview);
        }

        self.buffer.clear();
        debug!(
            "published snapshot {}: {} sentences, {} decoded, {} skipped, {} rejected",
            preview.epoch,
            report.sentences,
            report.decoded,
            report.skipped,
            report.rejections.len()
        );
        self.report = report;

        Ok(preview)
    }

    /// Returns the currently published snapshot.
    ///
    /// # Errors
    ///
    /// [`Error::SnapshotPoisoned`] if the snapshot lock is poisoned.
    pub fn snapshot(&self) -> Result<Arc<EpochSnapshot>> {
        self.handle().load()
    }

    /// Returns a reader of this session's snapshots.
    pub fn handle(&self) -> SnapshotHandle {
        SnapshotHandle {
            published: Arc::clone(&self.published),
        }
    }

    /// Returns the diagnostics of the latest commit.
    pub fn last_report(&self) -> &CommitReport {
        &self.report
    }

    /// Returns the number of buffered bytes, terminators included.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if nothing was appended since the last commit.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EpochBuffer {
    fn default() -> Self {
        EpochBuffer::new()
    }
}
