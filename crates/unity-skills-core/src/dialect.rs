//! Wire dialects for the convenience wrappers
//!
//! Two generations of the Unity-side server register the same operations
//! under different skill names and parameter keys. They are not
//! interchangeable, so the client is told explicitly which one it talks to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::params::{ParamValue, SkillRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `category_action` skill names (`gameobject_create`, `material_set_color`).
    #[default]
    Namespaced,
    /// The sample skill set (`create_cube`, `set_object_color`).
    Sample,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Namespaced => "namespaced",
            Self::Sample => "sample",
        }
    }

    pub fn create_cube(&self, x: f64, y: f64, z: f64, name: &str) -> SkillRequest {
        self.create_primitive("create_cube", "Cube", x, y, z, name)
    }

    pub fn create_sphere(&self, x: f64, y: f64, z: f64, name: &str) -> SkillRequest {
        self.create_primitive("create_sphere", "Sphere", x, y, z, name)
    }

    fn create_primitive(
        &self,
        sample_skill: &str,
        primitive: &str,
        x: f64,
        y: f64,
        z: f64,
        name: &str,
    ) -> SkillRequest {
        let request = match self {
            Self::Namespaced => {
                SkillRequest::new("gameobject_create").param("primitiveType", primitive)
            }
            Self::Sample => SkillRequest::new(sample_skill),
        };
        request
            .param("name", name)
            .param("x", ParamValue::number(x))
            .param("y", ParamValue::number(y))
            .param("z", ParamValue::number(z))
    }

    pub fn set_object_color(&self, object_name: &str, r: f64, g: f64, b: f64) -> SkillRequest {
        let (skill, key) = match self {
            Self::Namespaced => ("material_set_color", "gameObjectName"),
            Self::Sample => ("set_object_color", "objectName"),
        };
        SkillRequest::new(skill)
            .param(key, object_name)
            .param("r", ParamValue::number(r))
            .param("g", ParamValue::number(g))
            .param("b", ParamValue::number(b))
    }

    pub fn delete_object(&self, object_name: &str) -> SkillRequest {
        match self {
            Self::Namespaced => SkillRequest::new("gameobject_delete").param("name", object_name),
            Self::Sample => SkillRequest::new("delete_object").param("objectName", object_name),
        }
    }

    pub fn get_scene_info(&self) -> SkillRequest {
        match self {
            Self::Namespaced => SkillRequest::new("scene_get_info"),
            Self::Sample => SkillRequest::new("get_scene_info"),
        }
    }

    pub fn find_objects_by_tag(&self, tag: &str) -> SkillRequest {
        let skill = match self {
            Self::Namespaced => "gameobject_find",
            Self::Sample => "find_objects_by_tag",
        };
        SkillRequest::new(skill).param("tag", tag)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "namespaced" => Ok(Self::Namespaced),
            "sample" => Ok(Self::Sample),
            other => Err(format!(
                "unknown dialect '{other}' (expected 'namespaced' or 'sample')"
            )),
        }
    }
}
