//! Shared dashboard state for the REST handlers
//!
//! One session behind an async `RwLock`: views take the read lock, regeneration
//! and selection changes take the write lock and replace values wholesale.

use anyhow::Result;
use tokio::sync::RwLock;

use super::handlers::SelectionRequest;
use crate::filter::{FilterOptions, Selection};
use crate::models::ParseNameError;
use crate::session::{DashboardSession, DashboardView};
use crate::table::write_csv;

pub struct DashboardService {
    session: RwLock<DashboardSession>,
}

impl DashboardService {
    pub fn new(session: DashboardSession) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }

    pub async fn view(&self) -> DashboardView {
        self.session.read().await.view()
    }

    pub async fn options(&self) -> FilterOptions {
        self.session.read().await.options()
    }

    pub async fn selection(&self) -> Selection {
        self.session.read().await.selection().clone()
    }

    pub async fn set_selection(&self, selection: Selection) {
        self.session.write().await.set_selection(selection);
    }

    /// Merge a client request into the current selection under one write lock,
    /// so open bounds resolve against the selection being replaced
    pub async fn update_selection(&self, request: SelectionRequest) -> Result<Selection, ParseNameError> {
        let mut session = self.session.write().await;
        let selection = request.into_selection(session.selection())?;
        session.set_selection(selection.clone());
        Ok(selection)
    }

    /// Returns the new generation and its row count
    pub async fn regenerate(&self) -> (u64, usize) {
        let mut session = self.session.write().await;
        let generation = session.regenerate();
        (generation, session.base().len())
    }

    /// Filtered records of the current view as CSV bytes
    pub async fn export_csv(&self) -> Result<Vec<u8>> {
        let view = self.view().await;
        let mut buf = Vec::new();
        write_csv(&view.records, &mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::models::Region;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn service() -> Arc<DashboardService> {
        let config = DashboardConfig {
            rows: 80,
            seed: Some(21),
            ..DashboardConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        Arc::new(DashboardService::new(DashboardSession::with_today(&config, today).unwrap()))
    }

    #[tokio::test]
    async fn test_update_selection_keeps_open_bounds() {
        let svc = service();
        let before = svc.selection().await;
        let request = SelectionRequest {
            regions: vec!["North".into()],
            end: NaiveDate::from_ymd_opt(2024, 5, 31),
            ..SelectionRequest::default()
        };

        let selection = svc.update_selection(request).await.unwrap();
        assert_eq!(selection.date_range.start, before.date_range.start);
        assert_eq!(selection.date_range.end, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert!(selection.regions.contains(&Region::North));
        assert_eq!(svc.selection().await, selection);
    }

    #[tokio::test]
    async fn test_update_selection_rejects_unknown_name() {
        let svc = service();
        let before = svc.selection().await;
        let request = SelectionRequest {
            products: vec!["Tablet".into()],
            ..SelectionRequest::default()
        };
        assert!(svc.update_selection(request).await.is_err());
        assert_eq!(svc.selection().await, before);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_whole() {
        let svc = service();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        let a = {
            let svc = svc.clone();
            tokio::spawn(async move {
                svc.update_selection(SelectionRequest {
                    start: Some(start),
                    ..SelectionRequest::default()
                })
                .await
            })
        };
        let b = {
            let svc = svc.clone();
            tokio::spawn(async move {
                svc.update_selection(SelectionRequest {
                    end: Some(end),
                    ..SelectionRequest::default()
                })
                .await
            })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        // Each update saw the other's bound, whichever ran first
        let range = svc.selection().await.date_range;
        assert_eq!((range.start, range.end), (start, end));
    }
}
