// Only the most recently started remote run may deliver a result.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunTicket(u64);

#[derive(Debug, Default)]
pub struct RunGate {
    current: u64,
    in_flight: bool,
}

impl RunGate {
    /// Starts a run, superseding any run still in flight.
    pub fn begin(&mut self) -> RunTicket {
        if self.in_flight {
            tracing::debug!(superseded = self.current, "previous run superseded");
        }
        self.current += 1;
        self.in_flight = true;
        RunTicket(self.current)
    }

    pub fn is_current(&self, ticket: RunTicket) -> bool {
        self.in_flight && ticket.0 == self.current
    }

    /// Closes the run. Returns false for a superseded ticket, whose result must be dropped.
    pub fn finish(&mut self, ticket: RunTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn cancel(&mut self) {
        self.in_flight = false;
        self.current += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_run_supersedes_older() {
        let mut gate = RunGate::default();
        let first = gate.begin();
        let second = gate.begin();
        assert!(!gate.finish(first));
        assert!(gate.is_current(second));
        assert!(gate.finish(second));
        assert!(!gate.is_current(second));
    }

    #[test]
    fn cancelled_run_is_ignored() {
        let mut gate = RunGate::default();
        let t = gate.begin();
        gate.cancel();
        assert!(!gate.is_current(t));
        assert!(!gate.finish(t));
    }

    #[test]
    fn ticket_is_single_use() {
        let mut gate = RunGate::default();
        let t = gate.begin();
        assert!(gate.finish(t));
        assert!(!gate.finish(t));
    }
}
