//! Annotation entities and their factory.
//!
//! Annotations form a tagged set keyed by `type`. Only freehand ink (`draw`)
//! exists today; consumers dispatch on [`AnnotationKind`] so that text or
//! highlight variants can be added as new cases.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Color;
use crate::Point;

/// Identity of an annotation, stable for its whole lifetime.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    /// Fresh random id. Two calls never collide, even within the same instant.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AnnotationId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Draw,
}

/// Freehand ink stroke on one page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrawAnnotation {
    pub id: AnnotationId,
    pub document_id: String,
    /// 1-indexed.
    pub page_number: u32,
    pub points: Vec<Point>,
    pub color: Color,
    /// Fraction of the rendered page width.
    pub stroke_width: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum Annotation {
    #[serde(rename = "draw")]
    Draw(DrawAnnotation),
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::Draw(_) => AnnotationKind::Draw,
        }
    }

    pub fn id(&self) -> AnnotationId {
        match self {
            Annotation::Draw(draw) => draw.id,
        }
    }

    pub fn document_id(&self) -> &str {
        match self {
            Annotation::Draw(draw) => &draw.document_id,
        }
    }

    pub fn page_number(&self) -> u32 {
        match self {
            Annotation::Draw(draw) => draw.page_number,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Annotation::Draw(draw) => draw.created_at,
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Annotation::Draw(draw) => draw.updated_at,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Annotation::Draw(draw) => draw.user_id.as_deref(),
        }
    }

    pub fn as_draw(&self) -> Option<&DrawAnnotation> {
        match self {
            Annotation::Draw(draw) => Some(draw),
        }
    }
}

/// Everything the caller supplies when committing a stroke.
#[derive(Clone, Debug)]
pub struct NewDrawAnnotation {
    pub document_id: String,
    pub page_number: u32,
    pub points: Vec<Point>,
    pub color: Color,
    pub stroke_width: f32,
    pub user_id: Option<String>,
}

/// Builds a draw annotation with a fresh id and matching timestamps.
///
/// Callers must not pass an empty `points`; empty strokes are dropped before
/// they reach this point.
pub fn create_draw_annotation(params: NewDrawAnnotation) -> Annotation {
    let now = Utc::now();
    Annotation::Draw(DrawAnnotation {
        id: AnnotationId::generate(),
        document_id: params.document_id,
        page_number: params.page_number,
        points: params.points,
        color: params.color,
        stroke_width: params.stroke_width,
        created_at: now,
        updated_at: now,
        user_id: params.user_id,
    })
}

pub fn is_draw_annotation(annotation: &Annotation) -> bool {
    annotation.kind() == AnnotationKind::Draw
}
