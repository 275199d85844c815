/// The presentation part: slide order.
use crate::common::xml::fragment::{children_of, local_part, root_element};
use crate::ooxml::error::{OoxmlError, Result};

/// Relationship ids of the slides listed in `p:presentation/p:sldIdLst`,
/// in presentation order.
///
/// Each `p:sldId` carries both a numeric `id` and the namespaced `r:id`;
/// only the latter points at the slide part.
pub(crate) fn slide_rel_ids(partname: &str, xml: &[u8]) -> Result<Vec<String>> {
    let parse_err = |e| OoxmlError::xml(partname, e);

    let root = root_element(xml)
        .map_err(parse_err)?
        .filter(|root| root.local_name() == "presentation")
        .ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("{} is not a presentation part", partname))
        })?;

    let Some(sld_id_lst) = children_of(xml, &root)
        .map_err(parse_err)?
        .into_iter()
        .find(|child| child.local_name() == "sldIdLst")
    else {
        return Ok(Vec::new());
    };

    let mut ids = Vec::new();
    for sld_id in children_of(xml, &sld_id_lst).map_err(parse_err)? {
        if sld_id.local_name() != "sldId" {
            continue;
        }
        let r_id = sld_id
            .attrs
            .iter()
            .find(|(key, _)| key.contains(':') && local_part(key) == "id")
            .map(|(_, value)| value.clone())
            .ok_or_else(|| {
                OoxmlError::InvalidFormat(format!("p:sldId without r:id in {}", partname))
            })?;
        ids.push(r_id);
    }
    Ok(ids)
}
