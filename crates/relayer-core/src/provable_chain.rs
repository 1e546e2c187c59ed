use ibc_relay_types::core::ics24_host::identifier::ChainId;
use ibc_relay_types::path::PathEnd;

use crate::chain::{Chain, InitOptions};
use crate::error::Error;
use crate::instrumented::{InstrumentedChain, InstrumentedProver};
use crate::prover::Prover;

/// A chain paired with the prover of its state.
///
/// Both capabilities are always present. The concrete capability behind any
/// number of decorators can be recovered with [`ProvableChain::as_chain`] and
/// [`ProvableChain::as_prover`].
pub struct ProvableChain {
    chain: Box<dyn Chain>,
    prover: Box<dyn Prover>,
}

impl ProvableChain {
    pub fn new(chain: impl Chain + 'static, prover: impl Prover + 'static) -> Self {
        Self {
            chain: Box::new(chain),
            prover: Box::new(prover),
        }
    }

    /// Pairs `chain` and `prover` after wrapping each of them in its tracing
    /// decorator.
    pub fn instrumented<C, P>(chain: C, prover: P) -> Self
    where
        C: Chain + 'static,
        P: Prover + 'static,
    {
        Self::new(InstrumentedChain::new(chain), InstrumentedProver::new(prover))
    }

    pub fn chain(&self) -> &dyn Chain {
        &*self.chain
    }

    pub fn chain_mut(&mut self) -> &mut dyn Chain {
        &mut *self.chain
    }

    pub fn prover(&self) -> &dyn Prover {
        &*self.prover
    }

    pub fn prover_mut(&mut self) -> &mut dyn Prover {
        &mut *self.prover
    }

    pub fn chain_id(&self) -> &ChainId {
        self.chain.chain_id()
    }

    pub fn path(&self) -> &PathEnd {
        self.chain.path()
    }

    /// Finds the outermost chain layer of type `T`, looking through
    /// decorators.
    pub fn as_chain<T: Chain + 'static>(&self) -> Option<&T> {
        let mut current: &dyn Chain = &*self.chain;

        loop {
            if let Some(found) = current.as_any().downcast_ref::<T>() {
                return Some(found);
            }

            current = current.inner_chain()?;
        }
    }

    /// Finds the outermost prover layer of type `T`, looking through
    /// decorators.
    pub fn as_prover<T: Prover + 'static>(&self) -> Option<&T> {
        let mut current: &dyn Prover = &*self.prover;

        loop {
            if let Some(found) = current.as_any().downcast_ref::<T>() {
                return Some(found);
            }

            current = current.inner_prover()?;
        }
    }

    pub fn init(&mut self, options: &InitOptions) -> Result<(), Error> {
        self.chain.init(options)?;
        self.prover.init(options)
    }

    pub fn set_relay_info(
        &mut self,
        path: &PathEnd,
        counterparty_chain_id: &ChainId,
        counterparty_path: &PathEnd,
    ) -> Result<(), Error> {
        self.chain
            .set_relay_info(path, counterparty_chain_id, counterparty_path)?;
        self.prover
            .set_relay_info(path, counterparty_chain_id, counterparty_path)
    }

    pub async fn setup_for_relay(&mut self) -> Result<(), Error> {
        self.chain.setup_for_relay().await?;
        self.prover.setup_for_relay().await
    }
}
