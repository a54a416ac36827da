//! Creation flows

use super::{Flow, IdKind, StageSpec};

/// Product, its first model, first color and model details.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFlow;

impl ProductFlow {
    /// Product basics stage.
    pub const PRODUCT: usize = 0;

    /// First model stage.
    pub const MODEL: usize = 1;

    /// First color stage.
    pub const COLOR: usize = 2;

    /// Model details stage.
    pub const DETAILS: usize = 3;
}

impl Flow for ProductFlow {
    const NAME: &'static str = "product";

    const STAGES: &'static [StageSpec] = &[
        StageSpec {
            name: "Product",
            requires: &[],
            produces: Some(IdKind::Product),
        },
        StageSpec {
            name: "Model",
            requires: &[IdKind::Product],
            produces: Some(IdKind::Model),
        },
        StageSpec {
            name: "Color",
            requires: &[IdKind::Product, IdKind::Model],
            produces: Some(IdKind::Color),
        },
        StageSpec {
            name: "Details",
            requires: &[IdKind::Product, IdKind::Model],
            produces: None,
        },
    ];
}

/// Another model under an existing product.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelFlow;

impl ModelFlow {
    /// Model stage.
    pub const MODEL: usize = 0;

    /// First color stage.
    pub const COLOR: usize = 1;

    /// Model details stage.
    pub const DETAILS: usize = 2;
}

impl Flow for ModelFlow {
    const NAME: &'static str = "model";

    const STAGES: &'static [StageSpec] = &[
        StageSpec {
            name: "Model",
            requires: &[IdKind::Product],
            produces: Some(IdKind::Model),
        },
        StageSpec {
            name: "Color",
            requires: &[IdKind::Product, IdKind::Model],
            produces: Some(IdKind::Color),
        },
        StageSpec {
            name: "Details",
            requires: &[IdKind::Product, IdKind::Model],
            produces: None,
        },
    ];
}

/// Another color under an existing model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorFlow;

impl Flow for ColorFlow {
    const NAME: &'static str = "color";

    const STAGES: &'static [StageSpec] = &[StageSpec {
        name: "Color",
        requires: &[IdKind::Product, IdKind::Model],
        produces: Some(IdKind::Color),
    }];
}

/// Accessory basics, images and details.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessoryFlow;

impl AccessoryFlow {
    /// Accessory basics stage.
    pub const BASIC: usize = 0;

    /// Images stage.
    pub const IMAGES: usize = 1;

    /// Details stage.
    pub const DETAILS: usize = 2;
}

impl Flow for AccessoryFlow {
    const NAME: &'static str = "accessory";

    const STAGES: &'static [StageSpec] = &[
        StageSpec {
            name: "Basic",
            requires: &[],
            produces: Some(IdKind::Accessory),
        },
        StageSpec {
            name: "Images",
            requires: &[IdKind::Accessory],
            produces: None,
        },
        StageSpec {
            name: "Details",
            requires: &[IdKind::Accessory],
            produces: None,
        },
    ];
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        catalog::{AccessoryId, ModelId, ProductId},
        wizard::{Advance, Produced, Wizard},
    };

    use super::*;

    fn check_requires_are_produced_earlier<F: Flow>(scope: &[IdKind]) {
        for (index, stage) in F::STAGES.iter().enumerate() {
            for kind in stage.requires {
                let earlier = F::STAGES
                    .iter()
                    .take(index)
                    .any(|prior| prior.produces == Some(*kind));

                assert!(
                    earlier || scope.contains(kind),
                    "{} stage {} needs {kind:?} nobody produces",
                    F::NAME,
                    stage.name
                );
            }
        }
    }

    #[test]
    fn every_requirement_has_a_producer() {
        check_requires_are_produced_earlier::<ProductFlow>(&[]);
        check_requires_are_produced_earlier::<ModelFlow>(&[IdKind::Product]);
        check_requires_are_produced_earlier::<ColorFlow>(&[IdKind::Product, IdKind::Model]);
        check_requires_are_produced_earlier::<AccessoryFlow>(&[]);
    }

    #[test]
    fn accessory_flow_runs_to_completion() -> TestResult {
        let mut wizard = Wizard::<AccessoryFlow>::new();

        wizard.complete(AccessoryFlow::BASIC, Produced::Accessory(AccessoryId::new("a1")))?;
        wizard.complete(AccessoryFlow::IMAGES, Produced::Nothing)?;

        let advance = wizard.complete(AccessoryFlow::DETAILS, Produced::Nothing)?;

        assert!(
            matches!(advance, Advance::Finished(ref ids) if ids.accessory == Some(AccessoryId::new("a1"))),
            "unexpected advance {advance:?}"
        );

        Ok(())
    }

    #[test]
    fn color_stage_can_be_skipped_back_to_details_only_after_saving() -> TestResult {
        let mut wizard = Wizard::<ProductFlow>::new();

        wizard.complete(ProductFlow::PRODUCT, Produced::Product(ProductId::new("p1")))?;
        wizard.complete(ProductFlow::MODEL, Produced::Model(ModelId::new("m1")))?;

        assert!(!wizard.can_enter(ProductFlow::DETAILS));

        Ok(())
    }
}
