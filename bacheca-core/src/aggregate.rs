use futures_util::future::try_join;
use tracing::debug;

use crate::error::Result;
use crate::models::MessageList;
use crate::options::ListOptions;
use crate::storage::Storage;

/// Legge una pagina e il totale della collezione in parallelo e li combina.
///
/// Se una delle due letture fallisce l'altra viene abbandonata e si propaga
/// il primo errore: niente risultati parziali. Le due letture non vedono lo
/// stesso snapshot, quindi `total` e `data` possono divergere sotto scritture
/// concorrenti.
pub async fn list_messages<S>(storage: &S, opts: &ListOptions) -> Result<MessageList>
where
    S: Storage + ?Sized,
{
    let (data, total) = try_join(storage.list(opts), storage.count_total()).await?;

    debug!(
        page = opts.page,
        per_page = opts.per_page,
        total,
        returned = data.len(),
        "listed messages"
    );
    Ok(MessageList { total, data })
}
