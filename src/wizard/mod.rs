//! Staged Wizard
//!
//! Stage controller for hierarchical creation flows. A flow is an ordered list
//! of stages; each stage may need identifiers produced by earlier ones (a model
//! needs its product) and may produce one of its own. The controller only
//! tracks position and identifiers. Forms and network calls belong to the
//! session driving it.

use std::marker::PhantomData;

use thiserror::Error;

use crate::catalog::{AccessoryId, ColorId, ModelId, ProductId};

pub mod flows;

pub use flows::{AccessoryFlow, ColorFlow, ModelFlow, ProductFlow};

/// Kind of identifier a stage produces or needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// Parent product.
    Product,

    /// Model under the product.
    Model,

    /// Color under the model.
    Color,

    /// Stand-alone accessory.
    Accessory,
}

/// Identifier handed back by a completed stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Produced {
    /// The stage updated existing records only.
    Nothing,

    /// A product was created.
    Product(ProductId),

    /// A model was created.
    Model(ModelId),

    /// A color was created.
    Color(ColorId),

    /// An accessory was created.
    Accessory(AccessoryId),
}

impl Produced {
    /// Kind of id carried, if any.
    #[must_use]
    pub fn kind(&self) -> Option<IdKind> {
        match self {
            Self::Nothing => None,
            Self::Product(_) => Some(IdKind::Product),
            Self::Model(_) => Some(IdKind::Model),
            Self::Color(_) => Some(IdKind::Color),
            Self::Accessory(_) => Some(IdKind::Accessory),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Nothing => false,
            Self::Product(id) => id.is_blank(),
            Self::Model(id) => id.is_blank(),
            Self::Color(id) => id.is_blank(),
            Self::Accessory(id) => id.is_blank(),
        }
    }
}

/// Identifiers accumulated by a wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardIds {
    /// Product created or scoped to.
    pub product: Option<ProductId>,

    /// Model created or scoped to.
    pub model: Option<ModelId>,

    /// Color created.
    pub color: Option<ColorId>,

    /// Accessory created.
    pub accessory: Option<AccessoryId>,
}

impl WizardIds {
    /// Ids for a flow scoped to an existing product.
    #[must_use]
    pub fn for_product(product: ProductId) -> Self {
        Self {
            product: Some(product),
            ..Self::default()
        }
    }

    /// Ids for a flow scoped to an existing model.
    #[must_use]
    pub fn for_model(product: ProductId, model: ModelId) -> Self {
        Self {
            product: Some(product),
            model: Some(model),
            ..Self::default()
        }
    }

    /// Whether an id of `kind` is set.
    #[must_use]
    pub fn has(&self, kind: IdKind) -> bool {
        match kind {
            IdKind::Product => self.product.is_some(),
            IdKind::Model => self.model.is_some(),
            IdKind::Color => self.color.is_some(),
            IdKind::Accessory => self.accessory.is_some(),
        }
    }

    /// Store a produced id. Replacing a different id drops everything that hung
    /// off the old one. Returns whether dependants were dropped.
    pub fn store(&mut self, produced: Produced) -> bool {
        match produced {
            Produced::Nothing => false,
            Produced::Product(id) => {
                let replaced = self.product.replace(id.clone()).is_some_and(|old| old != id);

                if replaced {
                    self.model = None;
                    self.color = None;
                }

                replaced
            }
            Produced::Model(id) => {
                let replaced = self.model.replace(id.clone()).is_some_and(|old| old != id);

                if replaced {
                    self.color = None;
                }

                replaced
            }
            Produced::Color(id) => {
                self.color = Some(id);
                false
            }
            Produced::Accessory(id) => {
                self.accessory = Some(id);
                false
            }
        }
    }
}

/// Static description of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    /// Label shown on the step indicator.
    pub name: &'static str,

    /// Ids that must exist before the stage can be entered.
    pub requires: &'static [IdKind],

    /// Id the stage creates on its first save.
    pub produces: Option<IdKind>,
}

/// An ordered creation flow.
pub trait Flow {
    /// Flow name for logs.
    const NAME: &'static str;

    /// Stages, first to last. Never empty.
    const STAGES: &'static [StageSpec];
}

/// Stage controller errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// `complete` was called for a stage other than the active one.
    #[error("stage {given} is not the active stage {active}")]
    NotActive {
        /// Stage passed in.
        given: usize,

        /// Stage actually active.
        active: usize,
    },

    /// Navigation past the furthest unlocked stage.
    #[error("stage {stage} is locked; furthest unlocked stage is {max_reached}")]
    Locked {
        /// Requested stage.
        stage: usize,

        /// Furthest unlocked stage.
        max_reached: usize,
    },

    /// A stage still lacks an identifier it depends on.
    #[error("stage {stage} needs a {kind:?} id that has not been produced")]
    MissingIdentifier {
        /// Stage that cannot be entered.
        stage: usize,

        /// Missing id.
        kind: IdKind,
    },

    /// A stage produced an id it is not declared to produce.
    #[error("stage {stage} produced an unexpected {kind:?} id")]
    UnexpectedIdentifier {
        /// Completing stage.
        stage: usize,

        /// Kind produced.
        kind: IdKind,
    },

    /// The flow already ran to completion.
    #[error("wizard already finished")]
    Finished,
}

/// Outcome of completing a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to this stage.
    Next(usize),

    /// Last stage done; carries every id produced or scoped.
    Finished(WizardIds),
}

/// Stage controller for flow `F`.
#[derive(Debug)]
pub struct Wizard<F> {
    stage: usize,
    max_reached: usize,
    ids: WizardIds,
    scope: WizardIds,
    finished: bool,
    flow: PhantomData<F>,
}

impl<F: Flow> Default for Wizard<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Flow> Wizard<F> {
    /// A fresh wizard with no ids.
    #[must_use]
    pub fn new() -> Self {
        Self::scoped(WizardIds::default())
    }

    /// A wizard started under existing records, e.g. "add model" on a product row.
    /// Scoped ids survive `reset`.
    #[must_use]
    pub fn scoped(scope: WizardIds) -> Self {
        Self {
            stage: 0,
            max_reached: 0,
            ids: scope.clone(),
            scope,
            finished: false,
            flow: PhantomData,
        }
    }

    /// Active stage.
    #[must_use]
    pub fn stage(&self) -> usize {
        self.stage
    }

    /// Furthest unlocked stage.
    #[must_use]
    pub fn max_reached(&self) -> usize {
        self.max_reached
    }

    /// Ids accumulated so far.
    #[must_use]
    pub fn ids(&self) -> &WizardIds {
        &self.ids
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        F::STAGES.len()
    }

    /// Always false; flows have at least one stage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        F::STAGES.is_empty()
    }

    /// Whether the last stage has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Description of `stage`.
    #[must_use]
    pub fn spec(&self, stage: usize) -> Option<&'static StageSpec> {
        F::STAGES.get(stage)
    }

    /// Description of the active stage.
    #[must_use]
    pub fn current(&self) -> Option<&'static StageSpec> {
        self.spec(self.stage)
    }

    fn missing_for(&self, stage: usize) -> Option<IdKind> {
        self.spec(stage)?
            .requires
            .iter()
            .copied()
            .find(|kind| !self.ids.has(*kind))
    }

    /// Whether `stage` may be shown: unlocked and with every id it needs.
    #[must_use]
    pub fn can_enter(&self, stage: usize) -> bool {
        stage < self.len() && stage <= self.max_reached && self.missing_for(stage).is_none()
    }

    /// Record that `stage` saved successfully and move on.
    ///
    /// # Errors
    ///
    /// Fails without changing state when `stage` is not active, when it produced
    /// an id it does not declare, when a stage that must create an id produced
    /// none, or when the next stage would lack an id.
    pub fn complete(&mut self, stage: usize, produced: Produced) -> Result<Advance, WizardError> {
        if self.finished {
            return Err(WizardError::Finished);
        }

        if stage != self.stage {
            return Err(WizardError::NotActive {
                given: stage,
                active: self.stage,
            });
        }

        let spec = self.spec(stage).ok_or(WizardError::NotActive {
            given: stage,
            active: self.stage,
        })?;

        if let Some(kind) = produced.kind()
            && (spec.produces != Some(kind) || produced.is_blank())
        {
            return Err(WizardError::UnexpectedIdentifier { stage, kind });
        }

        let mut next_ids = self.ids.clone();
        let dropped_dependants = next_ids.store(produced);

        if let Some(kind) = spec.produces
            && !next_ids.has(kind)
        {
            return Err(WizardError::MissingIdentifier { stage, kind });
        }

        let next = stage + 1;

        if next == self.len() {
            self.ids = next_ids;
            self.finished = true;

            return Ok(Advance::Finished(self.ids.clone()));
        }

        if let Some(kind) = self
            .spec(next)
            .and_then(|spec| spec.requires.iter().copied().find(|kind| !next_ids.has(*kind)))
        {
            return Err(WizardError::MissingIdentifier { stage: next, kind });
        }

        self.ids = next_ids;
        self.max_reached = if dropped_dependants {
            next
        } else {
            self.max_reached.max(next)
        };
        self.stage = next;

        Ok(Advance::Next(next))
    }

    /// Jump to an unlocked stage. Ids and later stages' data are kept.
    ///
    /// # Errors
    ///
    /// Returns `Locked` past `max_reached` and `MissingIdentifier` when the
    /// stage's ids are gone.
    pub fn go_to(&mut self, stage: usize) -> Result<(), WizardError> {
        if stage > self.max_reached || stage >= self.len() {
            return Err(WizardError::Locked {
                stage,
                max_reached: self.max_reached,
            });
        }

        if let Some(kind) = self.missing_for(stage) {
            return Err(WizardError::MissingIdentifier { stage, kind });
        }

        self.stage = stage;

        Ok(())
    }

    /// Back to the initial state, keeping only the scope. Records already
    /// created remain on the server.
    pub fn reset(&mut self) {
        self.stage = 0;
        self.max_reached = 0;
        self.ids = self.scope.clone();
        self.finished = false;
    }

    /// Ids created by this wizard beyond its scope, i.e. what a cancel leaves behind.
    #[must_use]
    pub fn created(&self) -> WizardIds {
        WizardIds {
            product: self.ids.product.clone().filter(|_| self.scope.product.is_none()),
            model: self.ids.model.clone().filter(|_| self.scope.model.is_none()),
            color: self.ids.color.clone(),
            accessory: self.ids.accessory.clone(),
        }
    }
}
