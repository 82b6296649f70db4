// crates/infra/src/graphql/documents.rs
//! Operation documents sent to the deck-builder server.

pub const GET_FILTERS: &str = r"query getMTGFilters {
  getMTGFilters {
    types { cardType subtypes }
    expansions { set setName releasedAt imageURL setType games }
    legality { formats legalityValues }
    layouts
  }
}";

pub const GET_TAGS: &str = r"query tags {
  tags { ID name meta }
}";

pub const GET_TAG_CHAINS: &str = r"query getMTGTagChains {
  getMTGTagChains {
    tag { ID name meta }
    chain { ID name meta }
    chainDisplay
  }
}";

pub const GET_CARDS_FILTERED: &str = r"query getMTGCardsFiltered(
  $filter: MTG_Filter_SearchInput!
  $pagination: MTG_Filter_PaginationInput!
  $sort: [MTG_Filter_SortInput!]!
) {
  getMTGCardsFiltered(filter: $filter, pagination: $pagination, sort: $sort) {
    pagedCards {
      ID
      name
      typeLine
      cmc
      manaCost
      colorIdentity
      versions { ID set setName rarity games isDefault releasedAt }
    }
    totalCount
  }
}";

const PRESET_FIELDS: &str = "ID deckID name savedAt page filter sort { sortBy sortDirection enabled }";

pub fn get_filter_presets() -> String {
    format!(
        "query getMTGFilterPresets($deckID: ID!) {{\n  getMTGFilterPresets(deckID: $deckID) {{ {PRESET_FIELDS} }}\n}}"
    )
}

pub fn create_filter_preset() -> String {
    format!(
        "mutation createMTGFilterPreset($input: MTG_CreateFilterPresetInput!) {{\n  createMTGFilterPreset(input: $input) {{ {PRESET_FIELDS} }}\n}}"
    )
}

pub fn update_filter_preset() -> String {
    format!(
        "mutation updateMTGFilterPreset($input: MTG_UpdateFilterPresetInput!) {{\n  updateMTGFilterPreset(input: $input) {{ {PRESET_FIELDS} }}\n}}"
    )
}

pub const DELETE_FILTER_PRESET: &str = r"mutation deleteMTGFilterPreset($input: MTG_DeleteFilterPresetInput!) {
  deleteMTGFilterPreset(input: $input) { status message }
}";

pub const CREATE_TAG: &str = r"mutation createMTGTag($input: MTG_CreateTagInput!) {
  createMTGTag(input: $input) { ID name }
}";

pub const UPDATE_TAG: &str = r"mutation updateMTGTag($input: MTG_UpdateTagInput!) {
  updateMTGTag(input: $input) { ID name meta }
}";

pub const DELETE_TAG: &str = r"mutation deleteMTGTag($input: MTG_DeleteTagInput!) {
  deleteMTGTag(input: $input) { status message }
}";

pub const ASSIGN_TAG_TO_CARD: &str = r"mutation assignTagToCard($input: MTG_AssignTagToCardInput!) {
  assignTagToCard(input: $input) { status message }
}";

pub const UNASSIGN_TAG_FROM_CARD: &str = r"mutation unassignTagFromCard($input: MTG_UnassignTagFromCardInput!) {
  unassignTagFromCard(input: $input) { status message }
}";
