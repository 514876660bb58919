use serde::Deserialize;

use crate::location::AddressInfo;

/// Nominatim `/reverse?format=json` response body.
/// Only the fields we read; everything else is ignored.
#[derive(Deserialize, Debug)]
pub struct ReverseResponse {
    pub display_name: String,
    #[serde(default)]
    pub address: ReverseAddress,
}

/// The `address` object. Nominatim reports the settlement under one of
/// several keys depending on its size; precedence is city > town > village.
#[derive(Deserialize, Debug, Default)]
pub struct ReverseAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
}

impl ReverseResponse {
    pub fn into_address_info(self) -> AddressInfo {
        let ReverseAddress {
            city,
            town,
            village,
            state,
        } = self.address;
        AddressInfo {
            display_name: self.display_name,
            city: city.or(town).or(village),
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_wins_over_town_and_village() {
        let response: ReverseResponse = serde_json::from_str(
            r#"{"display_name":"somewhere","address":{"city":"London","town":"Soho","village":"X","state":"England"}}"#,
        )
        .unwrap();
        let info = response.into_address_info();
        assert_eq!(info.city.as_deref(), Some("London"));
        assert_eq!(info.state.as_deref(), Some("England"));
    }

    #[test]
    fn test_village_used_when_city_and_town_absent() {
        let response: ReverseResponse = serde_json::from_str(
            r#"{"display_name":"rural","address":{"village":"Lacock","state":"England"}}"#,
        )
        .unwrap();
        assert_eq!(response.into_address_info().city.as_deref(), Some("Lacock"));
    }

    #[test]
    fn test_missing_address_object_is_tolerated() {
        let response: ReverseResponse =
            serde_json::from_str(r#"{"display_name":"open ocean"}"#).unwrap();
        let info = response.into_address_info();
        assert_eq!(info.display_name, "open ocean");
        assert!(info.city.is_none());
        assert!(info.state.is_none());
    }
}
