//! Async glue that runs a workflow's begin/await/finish sequence.
//!
//! The workflow is only borrowed inside [`WorkflowCell::update`], never
//! across an `.await`, so other handlers (a `clear()` click, a second
//! request) can run while a response is outstanding.

use crate::cyclone::{CombinedTickets, CycloneError, CycloneWorkflow};
use crate::flood::{FloodError, FloodWorkflow};
use crate::geolocation::Geolocator;
use crate::hazard::{EarthquakeWorkflow, HazardError, LandslideWorkflow};
use drd_api::{PredictionService, StationInfo};
use futures::future::join;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, single-threaded mutable access to a workflow.
pub trait WorkflowCell<W> {
    fn update<R>(&self, f: impl FnOnce(&mut W) -> R) -> R;
}

impl<W> WorkflowCell<W> for RefCell<W> {
    fn update<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut *self.borrow_mut())
    }
}

impl<W> WorkflowCell<W> for Rc<RefCell<W>> {
    fn update<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut *self.borrow_mut())
    }
}

pub async fn predict_intensity(
    cell: &impl WorkflowCell<CycloneWorkflow>,
    service: &dyn PredictionService,
) -> Result<(), CycloneError> {
    let ticket = cell.update(CycloneWorkflow::begin_intensity)?;
    let outcome = service.predict_intensity(&ticket.image).await;
    cell.update(|wf| wf.finish_intensity(ticket, outcome));
    Ok(())
}

pub async fn predict_track(
    cell: &impl WorkflowCell<CycloneWorkflow>,
    service: &dyn PredictionService,
) -> Result<(), CycloneError> {
    let ticket = cell.update(CycloneWorkflow::begin_track)?;
    let outcome = service.predict_track(&ticket.request).await;
    cell.update(|wf| wf.finish_track(ticket, outcome));
    Ok(())
}

/// Issue intensity and track concurrently, applying each as it lands.
pub async fn predict_combined(
    cell: &impl WorkflowCell<CycloneWorkflow>,
    service: &dyn PredictionService,
) -> Result<(), CycloneError> {
    let CombinedTickets { intensity, track } = cell.update(CycloneWorkflow::begin_combined)?;
    let intensity = async move {
        if let Some(ticket) = intensity {
            let outcome = service.predict_intensity(&ticket.image).await;
            cell.update(|wf| wf.finish_intensity(ticket, outcome));
        }
    };
    let track = async move {
        if let Some(ticket) = track {
            let outcome = service.predict_track(&ticket.request).await;
            cell.update(|wf| wf.finish_track(ticket, outcome));
        }
    };
    join(intensity, track).await;
    Ok(())
}

pub async fn load_stations(
    cell: &impl WorkflowCell<FloodWorkflow>,
    service: &dyn PredictionService,
) -> Result<(), FloodError> {
    let ticket = cell.update(FloodWorkflow::begin_stations);
    let outcome = service.flood_stations().await;
    cell.update(|wf| wf.finish_stations(ticket, outcome))
}

pub async fn predict_station(
    cell: &impl WorkflowCell<FloodWorkflow>,
    service: &dyn PredictionService,
    station: &StationInfo,
) {
    let ticket = cell.update(|wf| wf.select_station(station));
    let outcome = service.predict_flood(&ticket.info).await;
    cell.update(|wf| wf.finish_prediction(ticket, outcome));
}

/// Find the station nearest the device. Does not predict.
pub async fn locate_nearest(
    cell: &impl WorkflowCell<FloodWorkflow>,
    geolocator: &dyn Geolocator,
) -> Result<Option<StationInfo>, FloodError> {
    let ticket = cell.update(FloodWorkflow::begin_locate);
    let outcome = geolocator.current_position().await;
    cell.update(|wf| wf.finish_locate(ticket, outcome))
}

pub async fn confirm_candidate(
    cell: &impl WorkflowCell<FloodWorkflow>,
    service: &dyn PredictionService,
) -> Result<(), FloodError> {
    let ticket = cell.update(FloodWorkflow::confirm_candidate)?;
    let outcome = service.predict_flood(&ticket.info).await;
    cell.update(|wf| wf.finish_prediction(ticket, outcome));
    Ok(())
}

pub async fn predict_earthquake(
    cell: &impl WorkflowCell<EarthquakeWorkflow>,
    service: &dyn PredictionService,
) -> Result<(), HazardError> {
    let ticket = cell.update(EarthquakeWorkflow::begin)?;
    let outcome = service.predict_earthquake(&ticket.request).await;
    cell.update(|wf| wf.finish(ticket, outcome));
    Ok(())
}

pub async fn predict_landslide(
    cell: &impl WorkflowCell<LandslideWorkflow>,
    service: &dyn PredictionService,
) -> Result<(), HazardError> {
    let ticket = cell.update(LandslideWorkflow::begin)?;
    let outcome = service.predict_landslide(&ticket.archive).await;
    cell.update(|wf| wf.finish(ticket, outcome));
    Ok(())
}
