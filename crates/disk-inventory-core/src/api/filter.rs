use crate::model::{DiskHealth, DiskKind};
use chrono::NaiveDate;

/// Query parameters understood by the disk list endpoint. Unset fields are
/// left out of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskFilter {
    /// Name contains (case-insensitive).
    pub nombre: Option<String>,
    pub tipo: Option<DiskKind>,
    pub descripcion: Option<String>,
    pub estado: Option<DiskHealth>,
    /// Any content name contains.
    pub contenido_nombre: Option<String>,
    pub contenido_fecha_desde: Option<NaiveDate>,
    pub contenido_fecha_hasta: Option<NaiveDate>,
    pub tamanio_gb_min: Option<f64>,
    pub tamanio_gb_max: Option<f64>,
    pub espacio_libre_min: Option<f64>,
    pub espacio_libre_max: Option<f64>,
    /// Free text over name, description and content names.
    pub search: Option<String>,
    /// `nombre`, `tipo` or `tamanio_gb`; prefix with `-` to reverse.
    pub ordering: Option<String>,
    pub page: Option<u32>,
}

impl DiskFilter {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        push_text(&mut pairs, "nombre", &self.nombre);
        if let Some(tipo) = self.tipo {
            pairs.push(("tipo", tipo.as_str().to_string()));
        }
        push_text(&mut pairs, "descripcion", &self.descripcion);
        if let Some(estado) = self.estado {
            pairs.push(("estado", estado.as_str().to_string()));
        }
        push_text(&mut pairs, "contenido_nombre", &self.contenido_nombre);
        push_date(&mut pairs, "contenido_fecha_desde", self.contenido_fecha_desde);
        push_date(&mut pairs, "contenido_fecha_hasta", self.contenido_fecha_hasta);
        push_number(&mut pairs, "tamanio_gb_min", self.tamanio_gb_min);
        push_number(&mut pairs, "tamanio_gb_max", self.tamanio_gb_max);
        push_number(&mut pairs, "espacio_libre_min", self.espacio_libre_min);
        push_number(&mut pairs, "espacio_libre_max", self.espacio_libre_max);
        push_text(&mut pairs, "search", &self.search);
        push_text(&mut pairs, "ordering", &self.ordering);
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }

        pairs
    }
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key, v.to_string()));
    }
}

fn push_date(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<NaiveDate>) {
    if let Some(d) = value {
        pairs.push((key, d.format("%Y-%m-%d").to_string()));
    }
}

fn push_number(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<f64>) {
    if let Some(n) = value {
        pairs.push((key, n.to_string()));
    }
}
