//! # Model
//!
//! Everything the transport engine needs: geometry reference, resolved
//! materials, settings, tallies and, for depletion runs, the schedule.
//! Construction validates settings and collects non-fatal diagnostics.

use crate::binding::MaterialSet;
use crate::depletion::DepletionSchedule;
use crate::error::ModelError;
use crate::geometry::DagmcGeometry;
use crate::settings::{RunMode, SimulationSettings};
use crate::tally::TallySet;
use pipeline_types::{trace_all, Diagnostic, Stage, TraceDiagnostic};

#[derive(Debug, Clone)]
pub struct Model {
    pub geometry: DagmcGeometry,
    pub materials: MaterialSet,
    pub tallies: TallySet,
    settings: SimulationSettings,
    depletion: Option<DepletionSchedule>,
    diagnostics: Vec<TraceDiagnostic>,
}

impl Model {
    /// # Errors
    ///
    /// `Settings` when the settings are invalid or ask for depletion mode,
    /// which only [`Model::with_depletion`] selects. Tag mismatches between
    /// geometry and materials are reported by the driver at export time.
    pub fn new(
        geometry: DagmcGeometry,
        materials: MaterialSet,
        settings: SimulationSettings,
        tallies: TallySet,
    ) -> Result<Self, ModelError> {
        settings.validate()?;
        if settings.run_mode == RunMode::Depletion {
            return Err(ModelError::Settings(
                "depletion mode needs a depletion schedule, attach one with with_depletion".into(),
            ));
        }

        let mut diagnostics = trace_all(Stage::Binding, &materials.diagnostics);
        let corners = geometry.corners();
        for tally in tallies.iter() {
            if !tally.encloses(&corners) {
                diagnostics.push(TraceDiagnostic::new(
                    Stage::Tallies,
                    Diagnostic::warning("tally mesh does not cover the whole geometry")
                        .with_subject(tally.name())
                        .with_hint("use the geometry corners as the tally bounding box"),
                ));
            }
            if tally.quantity().needs_photons() && !settings.photon_transport {
                diagnostics.push(TraceDiagnostic::new(
                    Stage::Tallies,
                    Diagnostic::warning("photon quantity scored without photon transport")
                        .with_subject(tally.name())
                        .with_hint("enable photon_transport in the settings"),
                ));
            }
        }

        Ok(Self {
            geometry,
            materials,
            settings,
            tallies,
            depletion: None,
            diagnostics,
        })
    }

    /// Attaches a depletion schedule and switches to depletion mode.
    pub fn with_depletion(mut self, schedule: DepletionSchedule) -> Self {
        if self.materials.depletable().next().is_none() {
            self.diagnostics.push(TraceDiagnostic::new(
                Stage::Depletion,
                Diagnostic::warning("depletion requested but no material is depletable")
                    .with_hint("mark materials depletable and give them a volume"),
            ));
        }
        self.settings.run_mode = RunMode::Depletion;
        self.depletion = Some(schedule);
        self
    }

    /// Depletion exactly when a schedule is attached.
    pub fn run_mode(&self) -> RunMode {
        self.settings.run_mode
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn depletion(&self) -> Option<&DepletionSchedule> {
        self.depletion.as_ref()
    }

    /// Non-fatal findings, tagged with the stage that raised them.
    pub fn diagnostics(&self) -> &[TraceDiagnostic] {
        &self.diagnostics
    }
}
