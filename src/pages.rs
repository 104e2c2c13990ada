//! Static listing content for the dashboard pages. The hint triggers key
//! off the tags carried here (limited, consumable).

use crate::models::Page;

pub struct ShopItem {
    pub name: &'static str,
    pub price: i64,
    pub category: &'static str,
    pub tags: &'static [&'static str],
}

pub struct OwnedItem {
    pub name: &'static str,
    pub quantity: u32,
    pub tags: &'static [&'static str],
}

pub struct Investment {
    pub name: &'static str,
    pub invested: i64,
    pub daily_return: i64,
    pub days_left: u32,
}

pub struct Guild {
    pub name: &'static str,
    pub members: u32,
    pub balance: i64,
}

pub const SHOP_CATEGORIES: &[&str] = &["Roles", "Consumables", "Collectibles", "Boosts"];

pub const SHOP_ITEMS: &[ShopItem] = &[
    ShopItem { name: "VIP Role", price: 50_000, category: "Roles", tags: &["role"] },
    ShopItem { name: "Color Role", price: 10_000, category: "Roles", tags: &[] },
    ShopItem { name: "Lucky Charm", price: 2_500, category: "Consumables", tags: &["consumable"] },
    ShopItem { name: "XP Potion", price: 4_000, category: "Consumables", tags: &["consumable"] },
    ShopItem { name: "Golden Trophy", price: 120_000, category: "Collectibles", tags: &["limited"] },
    ShopItem { name: "Founders Badge", price: 75_000, category: "Collectibles", tags: &["limited"] },
    ShopItem { name: "Daily Booster", price: 8_000, category: "Boosts", tags: &["consumable"] },
    ShopItem { name: "Interest Boost", price: 15_000, category: "Boosts", tags: &[] },
];

pub const INVENTORY_ITEMS: &[OwnedItem] = &[
    OwnedItem { name: "Lucky Charm", quantity: 3, tags: &["consumable"] },
    OwnedItem { name: "XP Potion", quantity: 2, tags: &["consumable"] },
    OwnedItem { name: "Golden Trophy", quantity: 1, tags: &["limited"] },
    OwnedItem { name: "Color Role", quantity: 1, tags: &["role"] },
];

pub const INVESTMENTS: &[Investment] = &[
    Investment { name: "Guild Bakery", invested: 25_000, daily_return: 1_250, days_left: 6 },
    Investment { name: "Crypto Mine", invested: 80_000, daily_return: 4_100, days_left: 2 },
    Investment { name: "Night Market", invested: 12_000, daily_return: 700, days_left: 12 },
];

pub const GUILDS: &[Guild] = &[
    Guild { name: "Emerald Traders", members: 128, balance: 1_250_000 },
    Guild { name: "Midnight Casino", members: 342, balance: 8_900_000 },
    Guild { name: "Quiet Library", members: 57, balance: 240_000 },
];

pub const WALLET_BALANCE: i64 = 152_340;
pub const BANK_BALANCE: i64 = 1_048_000;
pub const DAILY_STREAK: u32 = 14;

/// Number of selectable rows on a page. The shop counts its category nav
/// entries first, then the items.
pub fn row_count(page: Page, active_events: usize) -> usize {
    match page {
        Page::Shop => SHOP_CATEGORIES.len() + SHOP_ITEMS.len(),
        Page::Inventory => INVENTORY_ITEMS.len(),
        Page::Investments => INVESTMENTS.len(),
        Page::Events => active_events,
        Page::Guilds => GUILDS.len(),
        Page::Dashboard | Page::Home => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_rows_cover_nav_and_items() {
        assert_eq!(
            row_count(Page::Shop, 0),
            SHOP_CATEGORIES.len() + SHOP_ITEMS.len()
        );
    }

    #[test]
    fn pages_without_listings_have_no_rows() {
        assert_eq!(row_count(Page::Dashboard, 0), 0);
        assert_eq!(row_count(Page::Home, 0), 0);
        assert_eq!(row_count(Page::Events, 2), 2);
    }
}
