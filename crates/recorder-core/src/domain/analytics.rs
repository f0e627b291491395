//! Well-known analytics vocabularies
//!
//! Closed enumerations of the event names, parameter names and user
//! properties the analytics backend understands. Each member maps to exactly
//! one canonical string and back.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::attribute::{AttributeValue, Parameters};
use super::errors::DomainError;

/// Event parameters keyed by the typed vocabulary.
pub type TypedParameters = BTreeMap<AnalyticsParameter, AttributeValue>;

/// Declares a vocabulary enum with its canonical strings.
///
/// Generates `as_str`, `ALL`, `Display`, `FromStr` and string-based serde.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $unknown:ident {
            $( $variant:ident => $literal:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// The canonical string the backend expects
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $literal, )+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $literal => Ok($name::$variant), )+
                    other => Err(DomainError::$unknown(other.to_string())),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }
    };
}

vocabulary! {
    /// Predefined analytics event names
    AnalyticsEvent, UnknownEvent {
        AddPaymentInfo => "add_payment_info",
        AddToCart => "add_to_cart",
        AddToWishlist => "add_to_wishlist",
        AppOpen => "app_open",
        BeginCheckout => "begin_checkout",
        CampaignDetails => "campaign_details",
        CheckoutProgress => "checkout_progress",
        EarnVirtualCurrency => "earn_virtual_currency",
        EcommercePurchase => "ecommerce_purchase",
        GenerateLead => "generate_lead",
        JoinGroup => "join_group",
        LevelUp => "level_up",
        Login => "login",
        PostScore => "post_score",
        PresentOffer => "present_offer",
        PurchaseRefund => "purchase_refund",
        RemoveFromCart => "remove_from_cart",
        Search => "search",
        SelectContent => "select_content",
        SetCheckoutOption => "set_checkout_option",
        Share => "share",
        SignUp => "sign_up",
        SpendVirtualCurrency => "spend_virtual_currency",
        TutorialBegin => "tutorial_begin",
        TutorialComplete => "tutorial_complete",
        UnlockAchievement => "unlock_achievement",
        ViewItem => "view_item",
        ViewItemList => "view_item_list",
        ViewSearchResults => "view_search_results",
        LevelStart => "level_start",
        LevelEnd => "level_end",
    }
}

vocabulary! {
    /// Predefined analytics parameter names
    AnalyticsParameter, UnknownParameter {
        AchievementId => "achievement_id",
        AdNetworkClickId => "aclid",
        Affiliation => "affiliation",
        Campaign => "campaign",
        Character => "character",
        CheckoutStep => "checkout_step",
        CheckoutOption => "checkout_option",
        Content => "content",
        ContentType => "content_type",
        Coupon => "coupon",
        Cp1 => "cp1",
        CreativeName => "creative_name",
        CreativeSlot => "creative_slot",
        Currency => "currency",
        Destination => "destination",
        EndDate => "end_date",
        FlightNumber => "flight_number",
        GroupId => "group_id",
        Index => "index",
        ItemBrand => "item_brand",
        ItemCategory => "item_category",
        ItemId => "item_id",
        ItemLocationId => "item_location_id",
        ItemName => "item_name",
        ItemList => "item_list",
        ItemVariant => "item_variant",
        Level => "level",
        Location => "location",
        Medium => "medium",
        NumberOfNights => "number_of_nights",
        NumberOfPassengers => "number_of_passengers",
        NumberOfRooms => "number_of_rooms",
        Origin => "origin",
        Price => "price",
        Quantity => "quantity",
        Score => "score",
        SearchTerm => "search_term",
        Shipping => "shipping",
        SignUpMethod => "sign_up_method",
        Source => "source",
        StartDate => "start_date",
        Tax => "tax",
        Term => "term",
        TransactionId => "transaction_id",
        TravelClass => "travel_class",
        Value => "value",
        VirtualCurrencyName => "virtual_currency_name",
        LevelName => "level_name",
        Success => "success",
    }
}

vocabulary! {
    /// Predefined user property names
    AnalyticsUserProperty, UnknownUserProperty {
        SignUpMethod => "sign_up_method",
    }
}

/// Converts typed parameters to the string-keyed form the sink expects.
///
/// Values are moved unchanged and the entry count is preserved.
pub fn translate_parameters(parameters: TypedParameters) -> Parameters {
    parameters
        .into_iter()
        .map(|(key, value)| (key.as_str().to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_documented_literals() {
        assert_eq!(AnalyticsEvent::AddToCart.as_str(), "add_to_cart");
        assert_eq!(AnalyticsEvent::ViewSearchResults.as_str(), "view_search_results");
        assert_eq!(AnalyticsParameter::AdNetworkClickId.as_str(), "aclid");
        assert_eq!(AnalyticsParameter::Cp1.as_str(), "cp1");
        assert_eq!(AnalyticsUserProperty::SignUpMethod.to_string(), "sign_up_method");
    }

    #[test]
    fn test_event_mapping_is_injective() {
        let strings: HashSet<_> = AnalyticsEvent::ALL.iter().map(|e| e.as_str()).collect();
        assert_eq!(strings.len(), AnalyticsEvent::ALL.len());
        assert_eq!(AnalyticsEvent::ALL.len(), 31);
    }

    #[test]
    fn test_parameter_mapping_is_injective() {
        let strings: HashSet<_> = AnalyticsParameter::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(strings.len(), AnalyticsParameter::ALL.len());
        assert_eq!(AnalyticsParameter::ALL.len(), 49);
    }

    #[test]
    fn test_from_str_inverts_as_str() {
        for event in AnalyticsEvent::ALL {
            assert_eq!(event.as_str().parse::<AnalyticsEvent>(), Ok(*event));
        }
        for param in AnalyticsParameter::ALL {
            assert_eq!(param.as_str().parse::<AnalyticsParameter>(), Ok(*param));
        }
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert_eq!(
            "addToCart".parse::<AnalyticsEvent>(),
            Err(DomainError::UnknownEvent("addToCart".to_string()))
        );
        assert_eq!(
            "nope".parse::<AnalyticsUserProperty>(),
            Err(DomainError::UnknownUserProperty("nope".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let json = serde_json::to_string(&AnalyticsEvent::LevelUp).unwrap();
        assert_eq!(json, "\"level_up\"");
        let back: AnalyticsParameter = serde_json::from_str("\"search_term\"").unwrap();
        assert_eq!(back, AnalyticsParameter::SearchTerm);
    }

    #[test]
    fn test_translate_parameters_keeps_every_entry() {
        let mut typed = TypedParameters::new();
        typed.insert(AnalyticsParameter::ItemId, AttributeValue::from("sku-1"));
        typed.insert(AnalyticsParameter::Quantity, AttributeValue::from(3));
        typed.insert(AnalyticsParameter::Price, AttributeValue::from(9.99));

        let params = translate_parameters(typed);
        assert_eq!(params.len(), 3);
        assert_eq!(params["item_id"], AttributeValue::Text("sku-1".into()));
        assert_eq!(params["quantity"], AttributeValue::Int(3));
        assert_eq!(params["price"], AttributeValue::Float(9.99));
    }
}
