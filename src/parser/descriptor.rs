//! Declarative building description, as read from and written back to JSON.
//!
//! Field names follow the wire format (`l`, `d`, `h`, `o`, `valueProperty`, ...).
//! Values are read leniently: absent, `null`, non-numeric or non-finite
//! numbers all become `0` and malformed text becomes empty, so a half-typed
//! descriptor still renders.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const DEFAULT_POLLING_INTERVAL: f64 = 30.0;

/// Which planar axis a box's `l`/`d` map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Orientation {
    /// Length runs depth-wise.
    #[serde(rename = "ns")]
    NorthSouth,
    /// Length runs width-wise.
    #[default]
    #[serde(rename = "we")]
    WestEast,
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) if s == "ns" => Self::NorthSouth,
            _ => Self::WestEast,
        })
    }
}

/// One axis-aligned building element before it is expanded into faces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxDescriptor {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub z: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub l: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub d: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h: f64,
    #[serde(default)]
    pub o: Orientation,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub class: Option<String>,
}

impl BoxDescriptor {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, l: f64, d: f64, h: f64) -> Self {
        Self {
            x,
            y,
            z,
            l,
            d,
            h,
            o: Orientation::WestEast,
            class: None,
        }
    }

    /// Width and depth after applying the orientation.
    #[must_use]
    pub fn planar_extent(&self) -> (f64, f64) {
        match self.o {
            Orientation::NorthSouth => (self.d, self.l),
            Orientation::WestEast => (self.l, self.d),
        }
    }

    fn swap_axes(&mut self) {
        std::mem::swap(&mut self.l, &mut self.d);
        std::mem::swap(&mut self.x, &mut self.z);
    }
}

/// A box that also carries a live reading.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDescriptor {
    #[serde(flatten)]
    pub shape: BoxDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_flag")]
    pub outside: Option<bool>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub api: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub value_property: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub state_property: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub unit: Option<String>,
    #[serde(
        default = "default_polling_interval",
        deserialize_with = "lenient_polling_interval"
    )]
    pub polling_interval: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub layer: Option<String>,
}

impl SensorDescriptor {
    #[must_use]
    pub fn from_shape(shape: BoxDescriptor) -> Self {
        Self {
            shape,
            polling_interval: DEFAULT_POLLING_INTERVAL,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WallGroups {
    #[serde(default, deserialize_with = "nullable")]
    pub outer: Vec<BoxDescriptor>,
    #[serde(default, deserialize_with = "nullable")]
    pub inner: Vec<BoxDescriptor>,
}

/// One storey and everything placed on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FloorDescriptor {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub z: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub l: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub d: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub floors: Vec<BoxDescriptor>,
    #[serde(default, deserialize_with = "nullable")]
    pub ceilings: Vec<BoxDescriptor>,
    #[serde(default, deserialize_with = "nullable")]
    pub walls: WallGroups,
    #[serde(default, deserialize_with = "nullable")]
    pub windows: Vec<BoxDescriptor>,
    #[serde(default, deserialize_with = "nullable")]
    pub glass: Vec<BoxDescriptor>,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<BoxDescriptor>,
    #[serde(default, deserialize_with = "nullable")]
    pub sensors: Vec<SensorDescriptor>,
}

impl FloorDescriptor {
    /// Display name, empty when the floor is unnamed.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    fn list(&self, group: BoxGroup) -> Option<&Vec<BoxDescriptor>> {
        match group {
            BoxGroup::FloorSlabs => Some(&self.floors),
            BoxGroup::Ceilings => Some(&self.ceilings),
            BoxGroup::OuterWalls => Some(&self.walls.outer),
            BoxGroup::InnerWalls => Some(&self.walls.inner),
            BoxGroup::Windows => Some(&self.windows),
            BoxGroup::Glass => Some(&self.glass),
            BoxGroup::Items => Some(&self.items),
            BoxGroup::Sensors => None,
        }
    }

    fn list_mut(&mut self, group: BoxGroup) -> Option<&mut Vec<BoxDescriptor>> {
        match group {
            BoxGroup::FloorSlabs => Some(&mut self.floors),
            BoxGroup::Ceilings => Some(&mut self.ceilings),
            BoxGroup::OuterWalls => Some(&mut self.walls.outer),
            BoxGroup::InnerWalls => Some(&mut self.walls.inner),
            BoxGroup::Windows => Some(&mut self.windows),
            BoxGroup::Glass => Some(&mut self.glass),
            BoxGroup::Items => Some(&mut self.items),
            BoxGroup::Sensors => None,
        }
    }

    /// Number of entries in a group.
    #[must_use]
    pub fn len(&self, group: BoxGroup) -> usize {
        self.list(group).map_or(self.sensors.len(), Vec::len)
    }

    #[must_use]
    pub fn shape(&self, group: BoxGroup, index: usize) -> Option<&BoxDescriptor> {
        match self.list(group) {
            Some(list) => list.get(index),
            None => self.sensors.get(index).map(|s| &s.shape),
        }
    }

    pub fn shape_mut(&mut self, group: BoxGroup, index: usize) -> Option<&mut BoxDescriptor> {
        if group == BoxGroup::Sensors {
            return self.sensors.get_mut(index).map(|s| &mut s.shape);
        }
        self.list_mut(group).and_then(|list| list.get_mut(index))
    }

    /// Appends a shape to a group and returns its index.
    pub fn push_shape(&mut self, group: BoxGroup, shape: BoxDescriptor) -> usize {
        match self.list_mut(group) {
            Some(list) => {
                list.push(shape);
                list.len() - 1
            }
            None => {
                self.sensors.push(SensorDescriptor::from_shape(shape));
                self.sensors.len() - 1
            }
        }
    }

    /// Removes an entry, returning whether it existed.
    pub fn remove_shape(&mut self, group: BoxGroup, index: usize) -> bool {
        if index >= self.len(group) {
            return false;
        }
        match self.list_mut(group) {
            Some(list) => {
                list.remove(index);
            }
            None => {
                self.sensors.remove(index);
            }
        }
        true
    }

    fn swap_axes(&mut self) {
        std::mem::swap(&mut self.l, &mut self.d);
        std::mem::swap(&mut self.x, &mut self.z);
        for group in BoxGroup::ALL {
            if let Some(list) = self.list_mut(group) {
                list.iter_mut().for_each(BoxDescriptor::swap_axes);
            }
        }
        self.sensors.iter_mut().for_each(|s| s.shape.swap_axes());
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleRule {
    #[serde(default, deserialize_with = "nullable_text")]
    pub class: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub style: String,
}

/// The authoritative, editable description of a building.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildingDescriptor {
    #[serde(default, deserialize_with = "nullable_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub l: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub d: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub styles: Vec<StyleRule>,
    #[serde(default, deserialize_with = "nullable")]
    pub floors: Vec<FloorDescriptor>,
}

impl BuildingDescriptor {
    /// Swaps length and depth of the building and the x/z axes of every
    /// floor and nested box, so the long axis can follow the viewport.
    ///
    /// Applying it twice restores the original descriptor.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.l, &mut self.d);
        self.floors.iter_mut().for_each(FloorDescriptor::swap_axes);
    }

    /// The custom style rules as one stylesheet.
    #[must_use]
    pub fn stylesheet(&self) -> String {
        self.styles
            .iter()
            .map(|s| format!(".{}{{{}}}", s.class, s.style))
            .collect()
    }

    #[must_use]
    pub fn shape(&self, at: &DescriptorRef) -> Option<&BoxDescriptor> {
        self.floors.get(at.floor)?.shape(at.group, at.index)
    }

    pub fn shape_mut(&mut self, at: &DescriptorRef) -> Option<&mut BoxDescriptor> {
        self.floors.get_mut(at.floor)?.shape_mut(at.group, at.index)
    }

    #[must_use]
    pub fn sensor(&self, at: &DescriptorRef) -> Option<&SensorDescriptor> {
        if at.group != BoxGroup::Sensors {
            return None;
        }
        self.floors.get(at.floor)?.sensors.get(at.index)
    }

    pub fn sensor_mut(&mut self, at: &DescriptorRef) -> Option<&mut SensorDescriptor> {
        if at.group != BoxGroup::Sensors {
            return None;
        }
        self.floors.get_mut(at.floor)?.sensors.get_mut(at.index)
    }

    pub fn remove(&mut self, at: &DescriptorRef) -> bool {
        self.floors
            .get_mut(at.floor)
            .is_some_and(|f| f.remove_shape(at.group, at.index))
    }

    /// Non-empty sensor layers in descriptor order, repeats included.
    pub fn sensor_layers(&self) -> impl Iterator<Item = &str> {
        self.floors
            .iter()
            .flat_map(|f| &f.sensors)
            .filter_map(|s| s.layer.as_deref())
            .filter(|l| !l.is_empty())
    }
}

/// The lists a floor keeps its boxes in, in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BoxGroup {
    FloorSlabs,
    Ceilings,
    OuterWalls,
    InnerWalls,
    Windows,
    Glass,
    Items,
    Sensors,
}

impl BoxGroup {
    pub const ALL: [BoxGroup; 8] = [
        BoxGroup::FloorSlabs,
        BoxGroup::Ceilings,
        BoxGroup::OuterWalls,
        BoxGroup::InnerWalls,
        BoxGroup::Windows,
        BoxGroup::Glass,
        BoxGroup::Items,
        BoxGroup::Sensors,
    ];

    /// Dotted path of the list inside a floor descriptor.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            BoxGroup::FloorSlabs => "floors",
            BoxGroup::Ceilings => "ceilings",
            BoxGroup::OuterWalls => "walls.outer",
            BoxGroup::InnerWalls => "walls.inner",
            BoxGroup::Windows => "windows",
            BoxGroup::Glass => "glass",
            BoxGroup::Items => "items",
            BoxGroup::Sensors => "sensors",
        }
    }
}

impl fmt::Display for BoxGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for BoxGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.path() == s)
            .ok_or_else(|| format!("unknown shape list '{s}'"))
    }
}

/// Where a box lives in the descriptor tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DescriptorRef {
    pub floor: usize,
    pub group: BoxGroup,
    pub index: usize,
}

fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0.0, coerce_number))
}

fn default_polling_interval() -> f64 {
    DEFAULT_POLLING_INTERVAL
}

fn lenient_polling_interval<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => DEFAULT_POLLING_INTERVAL,
        Some(v) => coerce_number(&v),
    })
}

/// Strings as given, numbers as their JSON text, anything else as absent.
fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(text_of))
}

fn nullable_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => Some(s == "true"),
        Some(Value::Number(n)) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
        _ => None,
    })
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
