use crate::core::{Address, Amount};
use crate::meter::GasMeter;

/// One call's view of the host environment: who is calling, how much value
/// rides along, where outgoing value lands, and the meter the call is
/// charged against. The ledger consumes this; the host constructs it and
/// inspects it afterwards.
pub struct CallEnv {
    caller: Address,
    attached: Amount,
    transfers: Vec<(Address, Amount)>,
    pub meter: GasMeter,
}

impl CallEnv {
    pub fn new(caller: Address, attached: Amount) -> Self {
        Self {
            caller,
            attached,
            transfers: Vec::new(),
            meter: GasMeter::new(),
        }
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    pub fn attached(&self) -> Amount {
        self.attached
    }

    /// Outgoing value transfers issued so far, oldest first.
    pub fn transfers(&self) -> &[(Address, Amount)] {
        &self.transfers
    }

    pub fn transfer(&mut self, dst: Address, amount: Amount) {
        self.transfers.push((dst, amount));
    }

    // Rollback support: transfers issued inside a failed unit of work are
    // dropped along with its staged writes. Gas stays charged.
    pub(super) fn sent(&self) -> usize {
        self.transfers.len()
    }

    pub(super) fn revert_transfers(&mut self, sent: usize) {
        self.transfers.truncate(sent);
    }
}
