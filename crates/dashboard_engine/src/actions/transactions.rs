use super::settle_list;
use crate::backend::Backend;
use crate::models::Transaction;
use crate::normalize::fetch_list_data;
use crate::{ApiListResponse, ListQuery};

pub async fn get_wallet_transactions(
    backend: &dyn Backend,
    wallet_id: &str,
    query: &ListQuery,
) -> ApiListResponse<Transaction> {
    let path = format!("/wallets/{wallet_id}/transactions");
    settle_list(
        "get_wallet_transactions",
        fetch_list_data(backend, &path, query).await,
    )
}
