use crate::error::DrawError;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl SurfaceErrorAction {
    /// Folds the action into the stage's draw outcome.
    pub fn into_draw_error(self, err: &wgpu::SurfaceError) -> DrawError {
        match self {
            SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => DrawError::Skipped(err.to_string()),
            SurfaceErrorAction::Fatal => DrawError::Fatal(err.to_string()),
        }
    }
}

/// Maps a `SurfaceError` to the action the caller should take. Pure.
pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_out_of_memory_is_fatal() {
        let cases = [
            (wgpu::SurfaceError::Lost, SurfaceErrorAction::Reconfigured),
            (wgpu::SurfaceError::Outdated, SurfaceErrorAction::Reconfigured),
            (wgpu::SurfaceError::Timeout, SurfaceErrorAction::SkipFrame),
            (wgpu::SurfaceError::Other, SurfaceErrorAction::SkipFrame),
            (wgpu::SurfaceError::OutOfMemory, SurfaceErrorAction::Fatal),
        ];
        for (err, expected) in cases {
            assert_eq!(classify_surface_error(&err), expected, "{err:?}");
        }
    }

    #[test]
    fn reconfigured_surface_skips_the_frame() {
        let err = wgpu::SurfaceError::Outdated;
        let draw = classify_surface_error(&err).into_draw_error(&err);
        assert!(matches!(draw, DrawError::Skipped(_)));
    }
}
