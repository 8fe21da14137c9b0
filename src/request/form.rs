//! Shared form state behind the wizard pages

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::envelope::ReadRequest;
use super::odf::OdfPath;
use crate::wizard::{FormInspector, Step};

/// What the send page shows below the request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseState {
    #[default]
    Empty,
    Pending,
    Received {
        status: u16,
        body: String,
    },
    Failed(String),
}

/// Which text input on the parameter page has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterField {
    #[default]
    Ttl,
    Interval,
}

impl ParameterField {
    pub fn toggle(self) -> Self {
        match self {
            ParameterField::Ttl => ParameterField::Interval,
            ParameterField::Interval => ParameterField::Ttl,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParameterField::Ttl => "TTL (seconds)",
            ParameterField::Interval => "Interval (seconds, optional)",
        }
    }
}

/// Plain snapshot of the form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormData {
    /// Selectable paths, in catalog order
    pub objects: Vec<OdfPath>,
    /// Indices into `objects`
    pub checked: BTreeSet<usize>,
    pub ttl: String,
    pub interval: String,
    pub auto_regenerate: bool,
    /// Last generated request
    pub request: String,
    pub response: ResponseState,
}

/// O-MI accepts any finite number of seconds, including -1 for "forever"
pub fn is_numeric(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

impl FormData {
    pub fn selected_paths(&self) -> Vec<OdfPath> {
        self.checked
            .iter()
            .filter_map(|&i| self.objects.get(i).cloned())
            .collect()
    }

    pub fn objects_valid(&self) -> bool {
        !self.checked.is_empty()
    }

    pub fn parameters_valid(&self) -> bool {
        is_numeric(&self.ttl) && (self.interval.trim().is_empty() || is_numeric(&self.interval))
    }

    pub fn read_request(&self) -> ReadRequest {
        let interval = self.interval.trim();
        ReadRequest {
            ttl: self.ttl.clone(),
            interval: (!interval.is_empty()).then(|| interval.to_string()),
            paths: self.selected_paths(),
        }
    }
}

/// Form state shared by the UI and the request collaborators.
pub struct FormSession {
    data: RwLock<FormData>,
}

impl FormSession {
    pub fn new(objects: Vec<OdfPath>, default_ttl: &str, auto_regenerate: bool) -> Self {
        Self {
            data: RwLock::new(FormData {
                objects,
                ttl: default_ttl.to_string(),
                auto_regenerate,
                ..FormData::default()
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FormData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FormData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> FormData {
        self.read().clone()
    }

    pub fn object_count(&self) -> usize {
        self.read().objects.len()
    }

    pub fn toggle_object(&self, index: usize) {
        let mut data = self.write();
        if index >= data.objects.len() {
            return;
        }
        if !data.checked.remove(&index) {
            data.checked.insert(index);
        }
    }

    /// Check everything, or clear the selection if everything is checked
    pub fn toggle_all(&self) {
        let mut data = self.write();
        if data.checked.len() == data.objects.len() {
            data.checked.clear();
        } else {
            data.checked = (0..data.objects.len()).collect();
        }
    }

    pub fn field(&self, field: ParameterField) -> String {
        let data = self.read();
        match field {
            ParameterField::Ttl => data.ttl.clone(),
            ParameterField::Interval => data.interval.clone(),
        }
    }

    pub fn push_char(&self, field: ParameterField, c: char) {
        let mut data = self.write();
        match field {
            ParameterField::Ttl => data.ttl.push(c),
            ParameterField::Interval => data.interval.push(c),
        }
    }

    pub fn pop_char(&self, field: ParameterField) {
        let mut data = self.write();
        match field {
            ParameterField::Ttl => data.ttl.pop(),
            ParameterField::Interval => data.interval.pop(),
        };
    }

    pub fn read_request(&self) -> ReadRequest {
        self.read().read_request()
    }

    pub fn request(&self) -> String {
        self.read().request.clone()
    }

    pub fn set_request(&self, request: String) {
        self.write().request = request;
    }

    pub fn response(&self) -> ResponseState {
        self.read().response.clone()
    }

    pub fn set_response(&self, response: ResponseState) {
        self.write().response = response;
    }
}

impl FormInspector for FormSession {
    fn is_step_valid(&self, step: Step) -> bool {
        let data = self.read();
        match step {
            Step::Objects => data.objects_valid(),
            Step::Parameters => data.parameters_valid(),
            Step::Send => true,
        }
    }

    fn selection_count(&self) -> usize {
        self.read().checked.len()
    }

    fn auto_regenerate(&self) -> bool {
        self.read().auto_regenerate
    }

    fn set_auto_regenerate(&self, enabled: bool) {
        self.write().auto_regenerate = enabled;
    }
}
