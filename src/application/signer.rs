//! Build, sign and submit a transaction on behalf of a loaded account

use tracing::info;

use crate::domain::entities::{Account, Action, Transaction, TransactionResult};
use crate::domain::ports::NetworkClient;
use crate::domain::value_objects::AccountId;
use crate::error::StorefrontResult;

/// Sign `actions` as `signer` and wait for the final outcome.
///
/// The nonce and block hash come from one access-key query. A `Failure`
/// outcome comes back as a `Remote` error.
pub(crate) async fn sign_and_send<N>(
    network: &N,
    signer: &Account,
    receiver_id: &AccountId,
    actions: Vec<Action>,
) -> StorefrontResult<TransactionResult>
where
    N: NetworkClient + ?Sized,
{
    let public_key = signer.public_key();
    let access_key = network.view_access_key(signer.id(), &public_key).await?;
    let action_names: Vec<&'static str> = actions.iter().map(Action::name).collect();

    let signed = Transaction {
        signer_id: signer.id().clone(),
        public_key,
        nonce: access_key.nonce.saturating_add(1),
        receiver_id: receiver_id.clone(),
        block_hash: access_key.block_hash,
        actions,
    }
    .sign(signer.key_pair())?;

    info!(
        signer = %signer.id(),
        receiver = %receiver_id,
        tx_hash = %signed.hash(),
        actions = ?action_names,
        "sending transaction"
    );

    network.broadcast_tx_commit(&signed).await?.into_success()
}
