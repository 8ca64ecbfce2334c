use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use lektio_core::error::CoreError;
use lektio_db::store::ScheduleStore;

pub struct StoreHandler {
    pub store: Arc<dyn ScheduleStore>,
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        // Insert a reference to the store into the depot
        let store: Arc<dyn ScheduleStore> = self.store.clone();
        depot.inject(store);
    }
}

/// ## Summary
/// Retrieves the schedule store from the depot.
///
/// ## Errors
/// Returns an error if the store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn ScheduleStore>> {
    depot
        .obtain::<Arc<dyn ScheduleStore>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Schedule store not found in depot").into())
}
