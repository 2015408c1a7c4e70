use std::rc::Rc;

use modkit_core::{Ident, RegistryResult};
use modkit_datagen::{BlockState, Model};
use modkit_registry::{BuilderCallback, Registrar};

use crate::content::{Block, BlockSettings, Fluid, FluidSettings, Item, Material};
use crate::entry::FluidEntry;

use super::{BuilderBase, ItemBuilder, impl_builder_common};

/// A builder for fluids.
///
/// A fluid is a family of same-name registrations: the flowing variant this
/// builder is named for (`flowing_<name>`), the still source (`<name>`), and
/// by default a fluid block (`<name>`, dropping nothing) and a bucket item
/// (`<name>_bucket`) — all filed together when the chain terminates, and
/// navigable from the returned [`FluidEntry`].
pub struct FluidBuilder<P> {
    base: BuilderBase<P>,
    source_name: String,
    bucket_name: String,
    still_texture: Ident,
    flowing_texture: Ident,
    transforms: Vec<Box<dyn Fn(FluidSettings) -> FluidSettings>>,
    make_block: bool,
    make_bucket: bool,
}

impl_builder_common!(FluidBuilder, "fluid");

impl<P> FluidBuilder<P> {
    pub(crate) fn create(
        owner: Registrar,
        parent: P,
        name: String,
        callback: BuilderCallback,
        still_texture: Ident,
        flowing_texture: Ident,
    ) -> Self {
        let builder = Self {
            base: BuilderBase::new(owner, parent, format!("flowing_{name}"), callback),
            source_name: name.clone(),
            bucket_name: format!("{name}_bucket"),
            still_texture,
            flowing_texture,
            transforms: Vec::new(),
            make_block: true,
            make_bucket: true,
        };
        let water = Ident::new("minecraft", "fluids/water");
        builder.default_lang().tag(water)
    }

    /// Modify the fluid settings. Modifications run lazily at registration
    /// time, compose with earlier calls, and apply to both variants.
    pub fn properties(mut self, transform: impl Fn(FluidSettings) -> FluidSettings + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Skip the derived fluid block.
    pub fn without_block(mut self) -> Self {
        self.make_block = false;
        self
    }

    /// Skip the derived bucket item.
    pub fn without_bucket(mut self) -> Self {
        self.make_bucket = false;
        self
    }

    /// File the whole fluid family and return the flowing variant's entry.
    pub fn register(self) -> RegistryResult<FluidEntry> {
        Ok(self.file()?.0)
    }

    /// File the whole fluid family and return the parent for further
    /// chaining.
    pub fn build(self) -> RegistryResult<P> {
        Ok(self.file()?.1)
    }

    fn file(self) -> RegistryResult<(FluidEntry, P)> {
        let Self {
            base,
            source_name,
            bucket_name,
            still_texture,
            flowing_texture,
            transforms,
            make_block,
            make_bucket,
        } = self;
        let BuilderBase {
            owner,
            parent,
            name: flowing_name,
            callback,
        } = base;

        let transforms = Rc::new(transforms);
        let settings = {
            let transforms = Rc::clone(&transforms);
            move || {
                let mut settings = FluidSettings::new();
                for transform in transforms.iter() {
                    settings = transform(settings);
                }
                settings
            }
        };
        let block_name = make_block.then(|| source_name.clone());
        let bucket_name_opt = make_bucket.then(|| bucket_name.clone());
        let variant = {
            let source_name = source_name.clone();
            let flowing_name = flowing_name.clone();
            let textures = (still_texture.clone(), flowing_texture);
            move |source: bool| {
                let mut fluid = Fluid::new(
                    source,
                    settings(),
                    source_name.clone(),
                    flowing_name.clone(),
                )
                .with_textures(textures.0.clone(), textures.1.clone());
                if let Some(block) = &block_name {
                    fluid = fluid.with_block(block.clone());
                }
                if let Some(bucket) = &bucket_name_opt {
                    fluid = fluid.with_bucket(bucket.clone());
                }
                fluid
            }
        };

        // Still source variant under the base name.
        {
            let variant = variant.clone();
            owner.simple(&source_name, move || variant(true))?;
        }

        if make_block {
            let model_id = owner.ident(&format!("block/{source_name}"));
            owner.add_model(
                model_id.clone(),
                Model::new().texture("particle", still_texture.to_string()),
            );
            owner.add_blockstate(
                owner.ident(&source_name),
                BlockState::single(model_id.to_string()),
            );
            owner.simple(&source_name, || {
                Block::new(BlockSettings::of(Material::Liquid).drops_nothing())
            })?;
        }

        if make_bucket {
            owner
                .entry_named(bucket_name, |name, callback| {
                    ItemBuilder::create(
                        owner.clone(),
                        (),
                        name,
                        callback,
                        Box::new(|settings| Ok(Item::new(settings))),
                    )
                })
                .properties(|settings| settings.max_count(1))
                .register()?;
        }

        let entry = callback.accept::<Fluid>(&flowing_name, move || Ok(variant(false)))?;
        Ok((FluidEntry::new(entry), parent))
    }
}
