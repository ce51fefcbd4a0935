use std::fmt;

use tokio::sync::oneshot;

/// One kind of backend request. Each lane allows at most one request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Process,
    Match,
    Sample,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lane::Process => "process",
            Lane::Match => "match",
            Lane::Sample => "sample job description",
        })
    }
}

/// Handed to the request that won the lane.
#[derive(Debug)]
pub(crate) struct Ticket {
    pub seq: u64,
    /// Resolves when the lane is superseded (the sender is dropped).
    pub abort: oneshot::Receiver<()>,
}

/// Busy flag, freshness token and abort handle for one lane.
#[derive(Debug, Default)]
pub(crate) struct LaneSlot {
    busy: bool,
    seq: u64,
    abort: Option<oneshot::Sender<()>>,
}

impl LaneSlot {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Claims the lane, or `None` while another request holds it.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.busy {
            return None;
        }
        let (tx, rx) = oneshot::channel();
        self.busy = true;
        self.seq += 1;
        self.abort = Some(tx);
        Some(Ticket {
            seq: self.seq,
            abort: rx,
        })
    }

    /// Releases the lane if `seq` still owns it. Returns false for stale requests.
    pub fn finish(&mut self, seq: u64) -> bool {
        if !self.busy || self.seq != seq {
            return false;
        }
        self.busy = false;
        self.abort = None;
        true
    }

    /// Invalidates the in-flight request, if any, and frees the lane.
    /// Returns true when a request was actually cut off.
    pub fn supersede(&mut self) -> bool {
        let was_busy = self.busy;
        self.seq += 1;
        self.busy = false;
        // dropping the sender wakes the request's abort receiver
        self.abort = None;
        was_busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_rejected_while_busy() {
        let mut slot = LaneSlot::default();
        let first = slot.begin().unwrap();
        assert!(slot.is_busy());
        assert!(slot.begin().is_none());
        assert!(slot.finish(first.seq));
        assert!(slot.begin().is_some());
    }

    #[test]
    fn test_sequence_is_monotonic() {
        let mut slot = LaneSlot::default();
        let a = slot.begin().unwrap();
        slot.finish(a.seq);
        let b = slot.begin().unwrap();
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_stale_finish_ignored() {
        let mut slot = LaneSlot::default();
        let old = slot.begin().unwrap();
        assert!(slot.supersede());
        let fresh = slot.begin().unwrap();

        assert!(!slot.finish(old.seq));
        assert!(slot.is_busy());
        assert!(slot.finish(fresh.seq));
    }

    #[test]
    fn test_supersede_idle_lane_reports_nothing() {
        let mut slot = LaneSlot::default();
        assert!(!slot.supersede());
        assert!(!slot.is_busy());
    }

    #[tokio::test]
    async fn test_supersede_fires_abort() {
        let mut slot = LaneSlot::default();
        let ticket = slot.begin().unwrap();
        slot.supersede();
        // sender dropped: receiver resolves with an error
        assert!(ticket.abort.await.is_err());
    }
}
