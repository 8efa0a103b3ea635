use photoreport::core::actions::{
    add_page, copy_caption_from_previous, copy_title_from_previous, edit_caption, edit_header,
    edit_page_title, previous_cell, remove_page, set_photo_image,
};
use photoreport::errors::InputError;
use photoreport::models::{Document, FIRST_PAGE_SLOTS, HeaderField, NEW_PAGE_SLOTS};

fn doc_with_pages(n: usize) -> Document {
    let mut doc = Document::default();
    for _ in 1..n {
        doc = add_page(&doc);
    }
    doc
}

#[test]
fn default_document_has_one_page_with_four_slots() {
    let doc = Document::default();
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.pages[0].id, "page-1");
    assert_eq!(doc.pages[0].photos.len(), FIRST_PAGE_SLOTS);
    assert!(doc.pages[0].photos.iter().all(|p| p.caption.is_empty()));
    assert_eq!(doc.header.owner_name, "");
}

#[test]
fn edit_header_sets_only_the_given_field() {
    let doc = Document::default();
    let next = edit_header(&doc, HeaderField::ProjectName, "Bridge");
    assert_eq!(next.header.project_name, "Bridge");
    assert_eq!(next.header.owner_name, "");
    // input untouched
    assert_eq!(doc.header.project_name, "");
}

#[test]
fn out_of_range_edits_return_an_equal_document() {
    let doc = Document::default();
    assert_eq!(edit_page_title(&doc, 5, "x"), doc);
    assert_eq!(edit_caption(&doc, 0, 9, "x"), doc);
    assert_eq!(edit_caption(&doc, 3, 0, "x"), doc);
    assert_eq!(remove_page(&doc, 7), doc);
}

#[test]
fn copy_caption_within_page() {
    let doc = edit_caption(&Document::default(), 0, 0, "Foo");
    let next = copy_caption_from_previous(&doc, 0, 1).expect("copy");
    assert_eq!(next.pages[0].photos[1].caption, "Foo");
    assert_eq!(next.pages[0].photos[0].caption, "Foo");
}

#[test]
fn copy_caption_with_empty_source_is_rejected() {
    let doc = Document::default();
    let err = copy_caption_from_previous(&doc, 0, 1).unwrap_err();
    assert_eq!(err, InputError::SourceEmpty);
    assert_eq!(err.to_string(), "Previous cell not filled in");
}

#[test]
fn first_cell_of_first_page_has_no_previous() {
    let doc = edit_caption(&Document::default(), 0, 0, "Foo");
    assert_eq!(
        copy_caption_from_previous(&doc, 0, 0).unwrap_err(),
        InputError::NoPreviousCell
    );
}

#[test]
fn copy_caption_crosses_page_boundary() {
    let doc = doc_with_pages(2);
    let doc = edit_caption(&doc, 0, FIRST_PAGE_SLOTS - 1, "Last of first");

    assert_eq!(previous_cell(&doc, 1, 0), Ok((0, FIRST_PAGE_SLOTS - 1)));

    let next = copy_caption_from_previous(&doc, 1, 0).expect("copy");
    assert_eq!(next.pages[1].photos[0].caption, "Last of first");
}

#[test]
fn copy_title_rules() {
    let doc = doc_with_pages(2);
    assert_eq!(
        copy_title_from_previous(&doc, 0).unwrap_err(),
        InputError::NoPreviousPage
    );
    assert_eq!(
        copy_title_from_previous(&doc, 1).unwrap_err(),
        InputError::SourceEmpty
    );

    let doc = edit_page_title(&doc, 0, "Foundations");
    let next = copy_title_from_previous(&doc, 1).expect("copy");
    assert_eq!(next.pages[1].main_title, "Foundations");
}

#[test]
fn add_page_appends_six_independent_slots() {
    let doc = add_page(&Document::default());
    assert_eq!(doc.pages.len(), 2);
    assert_eq!(doc.pages[1].photos.len(), NEW_PAGE_SLOTS);
    assert_ne!(doc.pages[1].id, doc.pages[0].id);

    let edited = edit_caption(&doc, 1, 0, "only here");
    assert_eq!(edited.pages[1].photos[0].caption, "only here");
    assert!(edited.pages[1].photos[1..].iter().all(|p| p.caption.is_empty()));
}

#[test]
fn page_ids_stay_unique_after_removal() {
    // pages: page-1, page-2, page-3
    let doc = doc_with_pages(3);
    let doc = remove_page(&doc, 1);
    assert_eq!(doc.pages.len(), 2);
    assert_eq!(doc.pages[0].id, "page-1");
    assert_eq!(doc.pages[1].id, "page-3");

    let doc = add_page(&doc);
    let ids: Vec<&str> = doc.pages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["page-1", "page-3", "page-4"]);
}

#[test]
fn removing_the_only_page_leaves_an_empty_list() {
    let doc = remove_page(&Document::default(), 0);
    assert!(doc.pages.is_empty());

    let doc = add_page(&doc);
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.pages[0].photos.len(), NEW_PAGE_SLOTS);
}

#[test]
fn image_is_ignored_when_cell_is_gone() {
    let doc = doc_with_pages(2);
    let doc = remove_page(&doc, 1);
    let next = set_photo_image(&doc, 1, 0, "data:image/png;base64,AA==".into());
    assert_eq!(next, doc);

    let next = set_photo_image(&doc, 0, 2, "data:image/png;base64,AA==".into());
    assert!(next.pages[0].photos[2].has_image());
    assert_eq!(next.image_count(), 1);
}

#[test]
fn add_page_after_largest_possible_id_picks_a_free_one() {
    let mut doc = Document::default();
    doc.pages[0].id = format!("page-{}", u64::MAX);

    let next = add_page(&doc);
    assert_eq!(next.pages.len(), 2);
    assert_eq!(next.pages[1].id, "page-1");

    let third = add_page(&next);
    assert_eq!(third.pages[2].id, "page-2");
    assert_eq!(third.pages[2].photos.len(), NEW_PAGE_SLOTS);
}
