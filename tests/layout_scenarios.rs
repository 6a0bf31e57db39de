//! End-to-end layout runs: header seeding, room packing, page breaks and
//! regeneration.

use pretty_assertions::assert_eq;

use folio::document::{
    Canvas, CanvasItem, ImageRef, ItemContent, ItemKind, Origin, Placement, PropertyHeader,
    PropertyInfo,
};
use folio::geometry::{Point, Size};
use folio::layout::{ComposerConfig, LayoutEngine, PageBoundary, RoomImage, RoomSection};

fn room(name: &str, images: usize) -> RoomSection {
    RoomSection {
        room_id: name.to_lowercase(),
        name: name.to_string(),
        images: (0..images)
            .map(|i| RoomImage::new(ImageRef::new(format!("{}-{}.jpg", name.to_lowercase(), i))))
            .collect(),
    }
}

fn header() -> PropertyHeader {
    PropertyHeader {
        title: "4 Orchard Row".into(),
        info: PropertyInfo {
            address: "4 Orchard Row, Millbrook".into(),
            price: Some("$615,000".into()),
            bedrooms: Some(3),
            bathrooms: Some(2.0),
            area: Some("1,640 sq ft".into()),
            summary: "Bright corner lot with a new kitchen.".into(),
        },
        logo: Some(ImageRef::new("logo.png")),
        photo: Some(ImageRef::new("front.jpg")),
        disclaimer: "Measurements are approximate.".into(),
    }
}

fn engine() -> LayoutEngine {
    LayoutEngine::new(ComposerConfig::default())
}

fn on_page(canvas: &Canvas, page: u32, kind: ItemKind) -> usize {
    canvas
        .items_for_page(page)
        .iter()
        .filter(|item| item.kind == kind)
        .count()
}

/// Item content and geometry, without ids.
fn shape(canvas: &Canvas) -> Vec<(ItemKind, ItemContent, Point, Size, Placement, Option<ImageRef>, Option<String>)> {
    let mut items: Vec<_> = canvas
        .iter()
        .map(|item: &CanvasItem| {
            (
                item.kind,
                item.content.clone(),
                item.position,
                item.size,
                item.placement,
                item.image_source.clone(),
                item.description.clone(),
            )
        })
        .collect();
    items.sort_by(|a, b| {
        (a.1.as_text(), a.2.y, a.2.x)
            .partial_cmp(&(b.1.as_text(), b.2.y, b.2.x))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    items
}

#[test]
fn room_without_images_gets_one_placeholder() {
    let mut canvas = Canvas::new();
    let summary = engine().generate(&mut canvas, &[room("Attic", 0)]);

    assert_eq!(summary.pages, 1);
    assert_eq!(canvas.total_pages(), 1);
    let placeholders: Vec<_> = canvas
        .iter()
        .filter(|item| item.kind == ItemKind::Text)
        .map(|item| item.content.as_text().unwrap_or_default().to_string())
        .collect();
    assert_eq!(placeholders, vec!["No images available for Attic.".to_string()]);
    assert_eq!(on_page(&canvas, 1, ItemKind::Disclaimer), 0);
}

#[test]
fn second_image_breaks_to_page_two() {
    let mut canvas = Canvas::new();
    let summary = engine().generate(&mut canvas, &[room("Kitchen", 5)]);

    // 450 + 80 heading; label 530..590; image 1 590..920; image 2 would end at 1250
    assert_eq!(on_page(&canvas, 1, ItemKind::RoomLabel), 1);
    assert_eq!(on_page(&canvas, 1, ItemKind::Image), 1);
    assert_eq!(on_page(&canvas, 1, ItemKind::Disclaimer), 1);

    // Pages 2 and 3 start at 100 and hold two 330-unit blocks each
    assert_eq!(on_page(&canvas, 2, ItemKind::Image), 2);
    assert_eq!(on_page(&canvas, 3, ItemKind::Image), 2);
    assert_eq!(summary.pages, 3);
    assert_eq!(canvas.total_pages(), 3);

    let page1_disclaimer = canvas
        .iter()
        .find(|item| item.kind == ItemKind::Disclaimer && item.placement == Placement::ExplicitPage(1))
        .expect("page 1 clone");
    assert_eq!(page1_disclaimer.position, Point::new(50.0, 1030.0));
    assert_eq!(page1_disclaimer.size, Size::new(700.0, 40.0));
}

#[test]
fn overflowing_room_has_a_footer_on_every_page() {
    let mut canvas = Canvas::new();
    canvas.seed_property_header(&header(), &PageBoundary::default());
    let summary = engine().generate(&mut canvas, &[room("Garden", 6)]);

    assert!(summary.pages >= 2);
    for page in 1..=canvas.total_pages() {
        assert_eq!(on_page(&canvas, page, ItemKind::Disclaimer), 1, "page {}", page);
    }

    // Clones copy the header disclaimer text
    let texts: Vec<_> = canvas
        .iter()
        .filter(|item| item.kind == ItemKind::Disclaimer)
        .filter_map(|item| item.content.as_text())
        .collect();
    assert!(texts.iter().all(|t| *t == "Measurements are approximate."));
}

#[test]
fn header_items_stay_on_page_one() {
    let mut canvas = Canvas::new();
    let seeded = canvas.seed_property_header(&header(), &PageBoundary::default());
    engine().generate(&mut canvas, &[room("Kitchen", 3)]);

    let page1: Vec<_> = canvas.items_for_page(1).iter().map(|item| item.id).collect();
    let page2: Vec<_> = canvas.items_for_page(2).iter().map(|item| item.id).collect();
    assert!(page1.contains(&seeded.title));
    assert!(page1.contains(&seeded.info_block));
    assert!(!page2.contains(&seeded.title));
    assert!(seeded.fields.iter().all(|id| !page2.contains(id)));
}

#[test]
fn regenerating_yields_the_same_items() {
    let rooms = vec![room("Kitchen", 2), room("Attic", 0), room("Bedroom", 4)];
    let mut canvas = Canvas::new();
    canvas.seed_property_header(&header(), &PageBoundary::default());

    let first = engine().generate(&mut canvas, &rooms);
    let before = shape(&canvas);
    let second = engine().generate(&mut canvas, &rooms);

    assert_eq!(shape(&canvas), before);
    assert_eq!(second.items_cleared, first.items_created);
    assert_eq!(second.items_created, first.items_created);
}

#[test]
fn manual_items_survive_regeneration() {
    let mut canvas = Canvas::new();
    engine().generate(&mut canvas, &[room("Kitchen", 1)]);
    let note = canvas.create(ItemKind::Text, ItemContent::text("Agent note"), Size::new(200.0, 60.0), Some(1));

    engine().generate(&mut canvas, &[room("Kitchen", 1), room("Study", 1)]);

    let kept = canvas.get(note).expect("manual note kept");
    assert_eq!(kept.origin, Origin::Manual);
    assert!(canvas.iter().filter(|item| item.id != note).all(|item| item.is_auto_generated()));
}
