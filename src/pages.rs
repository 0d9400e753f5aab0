//! The café's public pages. Every node the editor may touch carries a
//! `data-editable` id; ids follow the naming the scope tables classify.

use dioxus::prelude::*;

use crate::visual_editor::component::EditingSurface;

struct Category {
    slug: &'static str,
    icon: &'static str,
    title: &'static str,
    description: &'static str,
}

static CATEGORIES: [Category; 3] = [
    Category { slug: "coffee", icon: "☕", title: "Coffee", description: "Single origin, roasted in house every week" },
    Category { slug: "pastry", icon: "🥐", title: "Pastry", description: "Croissants and buns from our own oven" },
    Category { slug: "brunch", icon: "🍳", title: "Brunch", description: "Served until three, every day" },
];

struct MenuItem {
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    price: &'static str,
}

struct MenuSection {
    slug: &'static str,
    title: &'static str,
    items: &'static [MenuItem],
}

static MENU: [MenuSection; 2] = [
    MenuSection {
        slug: "coffee",
        title: "Coffee",
        items: &[
            MenuItem { slug: "espresso", title: "Espresso", description: "Double shot", price: "€2.40" },
            MenuItem { slug: "latte", title: "Latte", description: "Espresso with steamed milk", price: "€3.60" },
            MenuItem { slug: "flat-white", title: "Flat white", description: "Less milk, more coffee", price: "€3.40" },
        ],
    },
    MenuSection {
        slug: "bakery",
        title: "Bakery",
        items: &[
            MenuItem { slug: "croissant", title: "Croissant", description: "Butter, laminated for three days", price: "€2.20" },
            MenuItem { slug: "cinnamon-bun", title: "Cinnamon bun", description: "With cardamom sugar", price: "€2.80" },
        ],
    },
];

#[component]
pub fn HomePage() -> Element {
    rsx! {
        header {
            style: "display: flex; align-items: center; gap: 16px; padding: 16px 32px; background: #1F2937;",
            img {
                "data-editable": "header-logo",
                src: "/assets/logo.png",
                alt: "Café",
                style: "height: 40px;",
            }
            PageLink { to: "/menu", "Menu" }
        }

        section {
            "data-editable": "hero-background",
            style: "padding: 96px 32px; text-align: center; background: #FF6B35; color: white;",
            span {
                "data-editable": "now-open-badge",
                style: "padding: 4px 12px; border-radius: 12px; background: #06FFA5; color: #1F2937;",
                "Now open"
            }
            h1 { "data-editable": "hero-title", style: "font-size: 48px;", "Good coffee, slow mornings" }
            p { "data-editable": "hero-subtitle", style: "font-size: 20px;", "A neighbourhood café with a wood-fired oven" }
            a { "data-editable": "hero-cta-button", href: "/menu", style: "color: white;", "See the menu" }
        }

        section { style: "display: flex; gap: 24px; padding: 48px 32px;",
            for category in CATEGORIES.iter() {
                div {
                    key: "{category.slug}",
                    "data-editable": "category-{category.slug}-card",
                    style: "flex: 1; padding: 24px; border-radius: 8px; background: #F3F4F6;",
                    span { "data-editable": "category-{category.slug}-icon", style: "font-size: 32px;", "{category.icon}" }
                    h3 { "data-editable": "category-{category.slug}-title", "{category.title}" }
                    p { "data-editable": "category-{category.slug}-description", "{category.description}" }
                }
            }
        }

        section { style: "padding: 48px 32px;",
            h2 { "data-editable": "about-title", "About us" }
            p { "data-editable": "about-text", "We opened in 2019 on the corner of the market square." }
            img {
                "data-editable": "about-photo",
                src: "/assets/interior.jpg",
                alt: "Inside the café",
                style: "max-width: 100%;",
            }
        }

        footer { style: "padding: 24px 32px; background: #111; color: #888;",
            p { "data-editable": "footer-text", "Open daily 8:00 to 18:00" }
        }
    }
}

#[component]
pub fn MenuPage() -> Element {
    rsx! {
        section { style: "padding: 64px 32px; text-align: center;",
            h1 { "data-editable": "menu-title", "Menu" }
            p { "data-editable": "menu-subtitle", "Everything is made here, every day" }
        }

        for menu_section in MENU.iter() {
            section {
                key: "{menu_section.slug}",
                "data-editable": "menu-{menu_section.slug}-section",
                style: "padding: 32px; margin: 16px 32px; border-radius: 8px; background: #F9FAFB;",
                h2 { "data-editable": "menu-{menu_section.slug}-section-title", "{menu_section.title}" }
                for item in menu_section.items.iter() {
                    div {
                        key: "{item.slug}",
                        style: "display: flex; justify-content: space-between; padding: 8px 0;",
                        div {
                            h4 { "data-editable": "menu-item-{item.slug}-title", style: "margin: 0;", "{item.title}" }
                            p { "data-editable": "menu-item-{item.slug}-description", style: "margin: 0;", "{item.description}" }
                        }
                        span { "data-editable": "menu-item-{item.slug}-price", "{item.price}" }
                    }
                }
            }
        }

        div { style: "padding: 32px; text-align: center;",
            a { "data-editable": "browse-menu-button", href: "/", "Back to the start" }
        }
    }
}

/// Router link on public pages; inside the editor a plain anchor, so the
/// editing surface decides whether the click may leave.
#[component]
fn PageLink(to: String, children: Element) -> Element {
    let editing = try_use_context::<EditingSurface>().is_some();
    if editing {
        return rsx! { a { href: "{to}", {children} } };
    }
    rsx! { Link { to, {children} } }
}
