//! Pluggable balance plotting
//!
//! Each [`PlotBackend`] wraps one plotting library behind the
//! [`PanelFactory`] / [`BalancePanel`] traits. Libraries are optional cargo
//! features, so a backend can be missing from a build; [`PlotBackend::probe`]
//! reports that as a [`PlotLibraryUnavailable`] naming the library and the
//! package to enable, and callers can move on to another backend.

pub mod panel;
pub mod text;

#[cfg(feature = "ratatui")]
pub mod chart;

#[cfg(feature = "plotters")]
pub mod svg;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PlotSettings;
use crate::error::{BankerError, BankerResult, PlotLibraryUnavailable};

pub use panel::{BalancePanel, PanelFactory, PanelState, PlotHost, PlotOptions};

/// A plotting library a backend depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotLibrary {
    pub name: &'static str,
    pub package: &'static str,
}

pub const RATATUI: PlotLibrary = PlotLibrary {
    name: "ratatui",
    package: "ratatui",
};

pub const PLOTTERS: PlotLibrary = PlotLibrary {
    name: "Plotters",
    package: "plotters",
};

/// The plotting libraries linked into a build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    linked: BTreeSet<&'static str>,
}

impl Capabilities {
    /// No optional libraries at all
    pub fn none() -> Self {
        Self::default()
    }

    /// What this binary was compiled with
    pub fn compiled() -> Self {
        let mut caps = Self::none();
        if cfg!(feature = "ratatui") {
            caps = caps.with(RATATUI);
        }
        if cfg!(feature = "plotters") {
            caps = caps.with(PLOTTERS);
        }
        caps
    }

    pub fn with(mut self, library: PlotLibrary) -> Self {
        self.linked.insert(library.package);
        self
    }

    pub fn without(mut self, library: PlotLibrary) -> Self {
        self.linked.remove(library.package);
        self
    }

    pub fn has(&self, library: PlotLibrary) -> bool {
        self.linked.contains(library.package)
    }
}

/// The fixed set of plotting backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlotBackend {
    /// Line chart drawn in the terminal with ratatui
    Chart,
    /// Vector image drawn with Plotters
    Svg,
    /// Plain table with a bar per bucket
    Text,
}

impl PlotBackend {
    pub const ALL: [PlotBackend; 3] = [Self::Chart, Self::Svg, Self::Text];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Svg => "svg",
            Self::Text => "text",
        }
    }

    /// The optional library this backend needs, if any
    pub fn library(&self) -> Option<PlotLibrary> {
        match self {
            Self::Chart => Some(RATATUI),
            Self::Svg => Some(PLOTTERS),
            Self::Text => None,
        }
    }

    /// Whether painted output is terminal text (as opposed to a file format)
    pub fn renders_to_terminal(&self) -> bool {
        !matches!(self, Self::Svg)
    }

    /// Check that this backend's library is linked
    pub fn probe(&self, caps: &Capabilities) -> Result<(), PlotLibraryUnavailable> {
        match self.library() {
            Some(library) if !caps.has(library) => Err(PlotLibraryUnavailable {
                library: library.name,
                package: library.package,
            }),
            _ => Ok(()),
        }
    }

    /// Probe, then hand out the backend's panel factory
    pub fn factory(&self, caps: &Capabilities) -> BankerResult<Box<dyn PanelFactory>> {
        self.probe(caps)?;

        match self {
            #[cfg(feature = "ratatui")]
            Self::Chart => Ok(Box::new(chart::ChartPanelFactory)),
            #[cfg(feature = "plotters")]
            Self::Svg => Ok(Box::new(svg::SvgPanelFactory)),
            Self::Text => Ok(Box::new(text::TextPanelFactory)),
            // Reachable only when a capability set claims a library this
            // build does not contain
            #[allow(unreachable_patterns)]
            other => {
                let library = other.library().unwrap_or(RATATUI);
                Err(PlotLibraryUnavailable {
                    library: library.name,
                    package: library.package,
                }
                .into())
            }
        }
    }
}

impl fmt::Display for PlotBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every backend with the outcome of its probe
pub fn probe_all(caps: &Capabilities) -> Vec<(PlotBackend, Result<(), PlotLibraryUnavailable>)> {
    PlotBackend::ALL
        .iter()
        .map(|backend| (*backend, backend.probe(caps)))
        .collect()
}

/// Backends whose libraries are present, in `PlotBackend::ALL` order
pub fn available_backends(caps: &Capabilities) -> Vec<PlotBackend> {
    probe_all(caps)
        .into_iter()
        .filter_map(|(backend, probe)| match probe {
            Ok(()) => Some(backend),
            Err(missing) => {
                tracing::debug!(%backend, %missing, "skipping plot backend");
                None
            }
        })
        .collect()
}

/// Pick the backend to plot with
///
/// An explicit request must be usable: a disabled backend is a validation
/// error and a missing library is reported as `PlotUnavailable`. Without a
/// request, `settings.backend_order` is walked and the first enabled backend
/// that probes successfully wins.
pub fn select_backend(
    requested: Option<PlotBackend>,
    settings: &PlotSettings,
    caps: &Capabilities,
) -> BankerResult<PlotBackend> {
    if let Some(backend) = requested {
        if settings.disabled_backends.contains(&backend) {
            return Err(BankerError::Validation(format!(
                "Plot backend '{}' is disabled in settings",
                backend
            )));
        }
        backend.probe(caps)?;
        return Ok(backend);
    }

    for backend in &settings.backend_order {
        if settings.disabled_backends.contains(backend) {
            continue;
        }
        match backend.probe(caps) {
            Ok(()) => {
                tracing::debug!(%backend, "selected plot backend");
                return Ok(*backend);
            }
            Err(missing) => tracing::debug!(%backend, %missing, "plot backend unavailable"),
        }
    }

    Err(BankerError::Config(
        "No plotting backend is available; check plot.backend_order and plot.disabled_backends"
            .into(),
    ))
}
