use std::io::Write;

use serde::Serialize;

use crate::error::{OmniError, Result};

/// Variables served by the hourly OMNI2 dataset, indexed by position.
pub const VAR_NAMES: [&str; 56] = [
    "YEAR",
    "DOY",
    "Hour",
    "Bartels rotation number",
    "ID for IMF spacecraft",
    "ID for SW Plasma spacecraft",
    "# of points in IMF averages",
    "# of points in Plasma averag.",
    "Scalar B, nT",
    "Vector B Magnitude,nT",
    "Lat. Angle of B (GSE)",
    "Long. Angle of B (GSE)",
    "BX, nT (GSE, GSM)",
    "BY, nT (GSE)",
    "BZ, nT (GSE)",
    "BY, nT (GSM)",
    "BZ, nT (GSM)",
    "RMS_magnitude, nT",
    "RMS_field_vector, nT",
    "RMS_BX_GSE, nT",
    "RMS_BY_GSE, nT",
    "RMS_BZ_GSE, nT",
    "SW Plasma Temperature, K",
    "SW Proton Density, N/cm^3",
    "SW Plasma Speed, km/s",
    "SW Plasma flow long. angle",
    "SW Plasma flow lat. angle",
    "Alpha/Prot. ratio",
    "Flow pressure",
    "sigma-T,K",
    "sigma-n, N/cm^3)",
    "sigma-V, km/s",
    "sigma-phi V, degrees",
    "sigma-theta V, degrees",
    "sigma-ratio",
    "E elecrtric field",
    "Plasma beta",
    "Alfen mach number",
    "Kp index",
    "R (Sunspot No.)",
    "Dst-index, nT",
    "AE-index, nT",
    "Proton flux (>1 Mev)",
    "Proton flux (>2 Mev)",
    "Proton flux (>4 Mev)",
    "Proton flux (>10 Mev)",
    "Proton flux (>30 Mev)",
    "Proton flux (>60 Mev)",
    "Flux FLAG",
    "ap_index, nT",
    "f10.7_index",
    "pc-index",
    "AL-index, nT",
    "AU-index, nT",
    "Magnetosonic Much num.",
    "Lyman_alpha",
];

pub const MIN_INDEX: i32 = 0;
pub const MAX_INDEX: i32 = VAR_NAMES.len() as i32 - 1;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogueEntry {
    pub index: i32,
    pub name: &'static str,
}

pub fn name(index: i32) -> Option<&'static str> {
    usize::try_from(index).ok().and_then(|i| VAR_NAMES.get(i).copied())
}

pub fn entries() -> impl Iterator<Item = CatalogueEntry> {
    VAR_NAMES.iter().enumerate().map(|(i, name)| CatalogueEntry {
        index: i as i32,
        name,
    })
}

/// Reject an empty selection or any index outside the catalogue.
pub fn validate(indices: &[i32]) -> Result<()> {
    if indices.is_empty() {
        return Err(OmniError::InvalidParameters(
            "at least one variable must be requested".to_string(),
        ));
    }
    if let Some(bad) = indices
        .iter()
        .find(|&&i| !(MIN_INDEX..=MAX_INDEX).contains(&i))
    {
        return Err(OmniError::InvalidParameters(format!(
            "variable {} is out of range, please use indices {} to {}",
            bad, MIN_INDEX, MAX_INDEX
        )));
    }
    Ok(())
}

/// Print every variable with its index, one `"<index> : <name>"` per line.
pub fn variables_info<W: Write>(out: &mut W) -> std::io::Result<()> {
    for entry in entries() {
        writeln!(out, "{} : {}", entry.index, entry.name)?;
    }
    Ok(())
}
