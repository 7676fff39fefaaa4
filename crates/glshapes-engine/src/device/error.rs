use std::ffi::CStr;

/// Fatal failures while bringing up the window, the GL context, or the
/// startup geometry.
///
/// The `Display` text of the first two variants is the fixed diagnostic
/// printed to stdout; underlying causes are reachable through `source()`.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The window or its GL context could not be created or made current.
    #[error("Failed to create OpenGL window")]
    WindowCreation {
        #[source]
        source: anyhow::Error,
    },

    /// The GL function table could not be loaded.
    #[error("Failed to initialize OpenGL function loader")]
    FunctionLoader {
        /// First entry point that failed to resolve.
        symbol: &'static CStr,
    },

    /// The driver refused to create a GPU object.
    #[error("failed to allocate GPU {resource}: {reason}")]
    Allocation {
        resource: &'static str,
        reason: String,
    },
}
