use scout_api::SetupResult;

/// How the backend's manual analysis went, derived from the setup result.
/// Drives the badge and explanatory copy on the analysis card — the color
/// match in draw.rs must cover the same set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// No setup result yet.
    #[default]
    None,
    /// No manual was supplied; season defaults in use.
    Warning,
    /// A previously analyzed manual was reused.
    Cached,
    /// Fallback heuristic produced a basic overview only.
    Basic,
    /// Analysis errored out.
    Error,
    /// Manual fully parsed and analyzed.
    Full,
    /// Result present but none of the flags line up.
    Unknown,
}

/// Fixed-precedence classification over `manual_info`. Exactly one label
/// comes out for any input, including a partial or absent record (all
/// falsy → Unknown).
pub fn classify(result: Option<&SetupResult>) -> AnalysisOutcome {
    let Some(result) = result else {
        return AnalysisOutcome::None;
    };
    let info = result.manual_info.clone().unwrap_or_default();

    if info.no_manual_warning {
        AnalysisOutcome::Warning
    } else if info.using_cached_manual {
        AnalysisOutcome::Cached
    } else if info.analysis_method.as_deref() == Some("basic overview") {
        AnalysisOutcome::Basic
    } else if info.analysis_error.is_some() {
        AnalysisOutcome::Error
    } else if info.text_length > 0 && info.analysis_complete {
        AnalysisOutcome::Full
    } else {
        AnalysisOutcome::Unknown
    }
}

impl AnalysisOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisOutcome::None => "",
            AnalysisOutcome::Warning => "NO MANUAL",
            AnalysisOutcome::Cached => "CACHED MANUAL",
            AnalysisOutcome::Basic => "BASIC OVERVIEW",
            AnalysisOutcome::Error => "ANALYSIS FAILED",
            AnalysisOutcome::Full => "FULL ANALYSIS",
            AnalysisOutcome::Unknown => "UNKNOWN",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            AnalysisOutcome::None => "",
            AnalysisOutcome::Warning => {
                "No game manual was provided. Scouting variables come from the season defaults."
            }
            AnalysisOutcome::Cached => {
                "Reused a previously analyzed manual for this game. Nothing was re-downloaded."
            }
            AnalysisOutcome::Basic => {
                "The manual could not be fully parsed. A basic overview was generated instead."
            }
            AnalysisOutcome::Error => {
                "Manual analysis failed. Setup fell back to default scouting variables."
            }
            AnalysisOutcome::Full => "The game manual was downloaded and fully analyzed.",
            AnalysisOutcome::Unknown => {
                "Manual analysis finished in an unrecognized state. Check the backend logs."
            }
        }
    }
}
