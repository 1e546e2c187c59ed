//! Finalized headers of both chains of a path, and the header sets that
//! bring each chain's counterparty client up to date.

use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::{debug, instrument};

use ibc_relay_types::core::ics02_client::header::Header;
use ibc_relay_types::core::ics24_host::identifier::ChainId;

use crate::chain::requests::QueryContext;
use crate::error::Error;
use crate::provable_chain::ProvableChain;

/// Latest finalized headers of the two chains of a path, fetched once per
/// relay step.
#[derive(Debug)]
pub struct SyncHeaders {
    latest_finalized_headers: BTreeMap<ChainId, Box<dyn Header>>,
}

impl SyncHeaders {
    pub async fn new(src: &ProvableChain, dst: &ProvableChain) -> Result<Self, Error> {
        let mut sync_headers = Self {
            latest_finalized_headers: BTreeMap::new(),
        };

        sync_headers.updates(src, dst).await?;

        Ok(sync_headers)
    }

    /// Refreshes the latest finalized header of both chains.
    #[instrument(
        name = "sync_headers.updates",
        skip_all,
        fields(src_chain = %src.chain_id(), dst_chain = %dst.chain_id())
    )]
    pub async fn updates(&mut self, src: &ProvableChain, dst: &ProvableChain) -> Result<(), Error> {
        let src_header = src.prover().get_latest_finalized_header().await?;
        let dst_header = dst.prover().get_latest_finalized_header().await?;

        debug!(
            src_height = %src_header.height(),
            dst_height = %dst_header.height(),
            "fetched latest finalized headers"
        );

        self.latest_finalized_headers
            .insert(src.chain_id().clone(), src_header);
        self.latest_finalized_headers
            .insert(dst.chain_id().clone(), dst_header);

        Ok(())
    }

    pub fn latest_finalized_header(&self, chain_id: &ChainId) -> Result<&dyn Header, Error> {
        self.latest_finalized_headers
            .get(chain_id)
            .map(|header| &**header)
            .ok_or_else(|| Error::missing_header(chain_id.clone()))
    }

    /// A query context pinned at the latest finalized height of `chain_id`.
    pub fn query_context(&self, chain_id: &ChainId) -> Result<QueryContext, Error> {
        let header = self.latest_finalized_header(chain_id)?;
        Ok(QueryContext::new(header.height()))
    }

    /// Headers of `src` to submit to `dst`, so that the client of `src`
    /// hosted on `dst` reaches the latest finalized header of `src`.
    pub async fn setup_headers_for_update(
        &self,
        src: &ProvableChain,
        dst: &ProvableChain,
    ) -> Result<Vec<Box<dyn Header>>, Error> {
        let latest = self.latest_finalized_header(src.chain_id())?;

        let headers = src
            .prover()
            .setup_headers_for_update(dst.chain(), latest)
            .await?;

        ensure_strictly_increasing(src.chain_id(), &headers)?;

        Ok(headers)
    }

    /// Header sets in both directions: first the headers of `src` for `dst`,
    /// then the headers of `dst` for `src`.
    pub async fn setup_both_headers_for_update(
        &self,
        src: &ProvableChain,
        dst: &ProvableChain,
    ) -> Result<(Vec<Box<dyn Header>>, Vec<Box<dyn Header>>), Error> {
        let src_headers = self.setup_headers_for_update(src, dst).await?;
        let dst_headers = self.setup_headers_for_update(dst, src).await?;

        Ok((src_headers, dst_headers))
    }
}

fn ensure_strictly_increasing(chain_id: &ChainId, headers: &[Box<dyn Header>]) -> Result<(), Error> {
    let heights = headers.iter().map(|header| header.height());

    for (previous, next) in heights.tuple_windows() {
        if next <= previous {
            return Err(Error::non_monotonic_headers(
                chain_id.clone(),
                previous,
                next,
            ));
        }
    }

    Ok(())
}
