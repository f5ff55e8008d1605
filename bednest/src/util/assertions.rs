use itertools::Itertools;
use log::error;

use crate::entities::{Bin, PackGroup};
use crate::geometry::geo_traits::{CollidesWith, Shape};

//Various checks to verify correctness of the nesting output
//Used in debug_assert!() blocks

/// Every index in `0..n_items` appears exactly once over all groups
pub fn indices_conserved(groups: &[PackGroup], n_items: usize) -> bool {
    let indices = groups.iter().flat_map(|g| g.indices()).sorted().collect_vec();
    let conserved = indices.iter().copied().eq(0..n_items);
    if !conserved {
        error!("pack group indices {indices:?} do not cover 0..{n_items} exactly once");
    }
    conserved
}

/// No two inflated items of the group overlap
pub fn no_overlap(group: &PackGroup) -> bool {
    let shapes = group
        .items()
        .map(|i| (i.id, i.transformed_inflated()))
        .collect_vec();
    shapes
        .iter()
        .tuple_combinations()
        .all(|((id_a, a), (id_b, b))| match a.collides_with(b) {
            true => {
                error!("inflated items {id_a} and {id_b} overlap");
                false
            }
            false => true,
        })
}

/// Every item of the group lies inside `bin`,
/// except an item that is on its own and does not fit any empty bin.
pub fn items_contained(group: &PackGroup, bin: &Bin) -> bool {
    group.items().all(|item| {
        let s_bb = item.shape.bbox();
        let oversized = s_bb.width() > bin.width() || s_bb.height() > bin.height();
        let contained = bin.rect.contains(&item.transformed_shape().bbox());
        match contained || (oversized && group.len() == 1) {
            true => true,
            false => {
                error!("item {} is not contained in bin {:?}", item.id, bin.rect);
                false
            }
        }
    })
}

pub fn pack_groups_valid(groups: &[PackGroup], bin: &Bin, n_items: usize) -> bool {
    indices_conserved(groups, n_items)
        && groups
            .iter()
            .all(|g| !g.is_empty() && no_overlap(g) && items_contained(g, bin))
}
