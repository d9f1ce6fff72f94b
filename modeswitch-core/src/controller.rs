use crate::config::{ConfigError, ToggleConfig, TriggerSpec};
use crate::mode::Mode;
use crate::page::{Emphasis, Page, WidgetSpec};
use crate::store::{Preference, PreferenceStore};

/// Owns the current [`Mode`] and keeps the page root, the bound triggers and
/// the persisted preference in agreement with it.
///
/// Construct one per page. The host wires trigger activation (clicks) to
/// [`ModeController::activate`].
pub struct ModeController<S, P> {
    config: ToggleConfig,
    preference: Preference<S>,
    page: P,
    mode: Mode,
    bound: Vec<TriggerSpec>,
}

impl<S, P> ModeController<S, P>
where
    S: PreferenceStore,
    P: Page,
{
    /// Create a controller over `store` and `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: ToggleConfig, store: S, page: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let preference = Preference::new(store, config.storage_key(), config.encoding);
        Ok(Self {
            config,
            preference,
            page,
            mode: Mode::Standard,
            bound: Vec::new(),
        })
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn config(&self) -> &ToggleConfig {
        &self.config
    }

    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    #[must_use]
    pub const fn preference(&self) -> &Preference<S> {
        &self.preference
    }

    /// Ids of the triggers found by the last [`Self::initialize`].
    pub fn bound_ids(&self) -> impl Iterator<Item = &str> {
        self.bound.iter().map(|t| t.id.as_str())
    }

    /// Take ownership of the root class on the page before initializing.
    ///
    /// Returns `false` if another controller already owns it; that controller
    /// keeps its own mode, so the host must not initialize this one.
    #[must_use]
    pub fn claim(&self) -> bool {
        self.page.claim_root_class(&self.config.root_class)
    }

    /// Load the saved mode, show it, find the triggers and style them.
    ///
    /// Safe to call again after an in-page navigation: the store is re-read,
    /// the widget is not inserted twice and bindings are rebuilt. Returns the
    /// ids the host should subscribe to.
    pub fn initialize(&mut self) -> Vec<String> {
        self.mode = self.preference.load();
        self.apply(self.mode);

        if let Some(widget) = WidgetSpec::from_config(&self.config) {
            let present = widget.buttons.iter().any(|b| self.page.has_element(&b.id));
            if present {
                log::debug!("switcher widget already present, reusing it");
            } else if let Err(err) = self.page.insert_widget(&widget) {
                log::warn!("could not insert switcher widget: {err}");
            }
        }

        self.bound = self
            .config
            .triggers
            .iter()
            .filter(|trigger| {
                let found = self.page.has_element(&trigger.id);
                if !found {
                    log::debug!("trigger #{} not on page, skipping", trigger.id);
                }
                found
            })
            .cloned()
            .collect();

        self.sync_triggers();
        log::debug!(
            "mode toggle ready: {:?}, {} trigger(s)",
            self.mode,
            self.bound.len()
        );
        self.bound.iter().map(|t| t.id.clone()).collect()
    }

    /// Put the root marker class in the state for `mode`. Idempotent.
    pub fn apply(&self, mode: Mode) {
        if let Err(err) = self
            .page
            .set_root_class(&self.config.root_class, mode.is_accessibility())
        {
            log::warn!("could not apply {mode:?}: {err}");
        }
    }

    /// Flip the mode, then show, persist and restyle.
    pub fn toggle(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.apply(self.mode);
        self.preference.save(self.mode);
        self.sync_triggers();
        log::debug!("mode toggled to {:?}", self.mode);
        self.mode
    }

    /// Switch to `mode` if it is not already current.
    pub fn select(&mut self, mode: Mode) -> Mode {
        if mode != self.mode {
            self.toggle();
        }
        self.mode
    }

    /// Handle activation of the trigger `id`.
    ///
    /// Returns `None` for ids that were not bound.
    pub fn activate(&mut self, id: &str) -> Option<Mode> {
        let requested = self.bound.iter().find(|t| t.id == id)?.mode;
        Some(match requested {
            Some(mode) => self.select(mode),
            None => self.toggle(),
        })
    }

    /// Restyle every bound trigger from the current mode.
    pub fn sync_triggers(&self) {
        for trigger in &self.bound {
            let emphasis = Emphasis::from_config(&self.config, trigger.is_active_for(self.mode));
            if let Err(err) = self.page.set_emphasis(&trigger.id, &emphasis) {
                log::warn!("could not restyle trigger #{}: {err}", trigger.id);
            }
        }
    }
}
