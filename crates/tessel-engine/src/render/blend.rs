use crate::paint::BlendMode;

const PREMUL_OVER: wgpu::BlendComponent = wgpu::BlendComponent {
    src_factor: wgpu::BlendFactor::One,
    dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
    operation: wgpu::BlendOperation::Add,
};

const KEEP_DST: wgpu::BlendComponent = wgpu::BlendComponent {
    src_factor: wgpu::BlendFactor::Zero,
    dst_factor: wgpu::BlendFactor::One,
    operation: wgpu::BlendOperation::Add,
};

fn additive(operation: wgpu::BlendOperation) -> wgpu::BlendComponent {
    wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation,
    }
}

impl BlendMode {
    /// Pipeline blend state for this mode. Colors are premultiplied.
    pub fn blend_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Opaque => wgpu::BlendState::REPLACE,
            BlendMode::Alpha => wgpu::BlendState { color: PREMUL_OVER, alpha: PREMUL_OVER },
            BlendMode::Add => wgpu::BlendState {
                color: additive(wgpu::BlendOperation::Add),
                alpha: additive(wgpu::BlendOperation::Add),
            },
            // dst - src
            BlendMode::Sub => wgpu::BlendState {
                color: additive(wgpu::BlendOperation::ReverseSubtract),
                alpha: additive(wgpu::BlendOperation::ReverseSubtract),
            },
            BlendMode::Mult => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::Dst,
                    dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: PREMUL_OVER,
            },
            BlendMode::MaskAdd => wgpu::BlendState {
                color: KEEP_DST,
                alpha: additive(wgpu::BlendOperation::Add),
            },
            BlendMode::MaskRemove => wgpu::BlendState {
                color: KEEP_DST,
                alpha: additive(wgpu::BlendOperation::ReverseSubtract),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_premultiplied_over() {
        let state = BlendMode::Alpha.blend_state();
        assert_eq!(state.color.src_factor, wgpu::BlendFactor::One);
        assert_eq!(state.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }

    #[test]
    fn masks_leave_color_untouched() {
        for mode in [BlendMode::MaskAdd, BlendMode::MaskRemove] {
            assert_eq!(mode.blend_state().color, KEEP_DST);
        }
    }

    #[test]
    fn opaque_replaces() {
        assert_eq!(BlendMode::Opaque.blend_state(), wgpu::BlendState::REPLACE);
    }
}
