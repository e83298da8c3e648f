use crate::parsers::extract_entries;
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://eksisozluk.com").unwrap()
    }

    fn entry_item(id: u32) -> String {
        format!(
            r#"<li data-id="{id}" data-author="yazar{id}">
                 <div class="content">entry {id}</div>
                 <footer>
                   <a class="entry-author" href="/biri/yazar{id}">yazar{id}</a>
                   <a class="entry-date permalink" href="/entry/{id}">01.02.2020 14:33</a>
                 </footer>
               </li>"#
        )
    }

    fn page(items: &[String]) -> String {
        format!(
            r#"<html><body><ul id="entry-item-list">{}</ul></body></html>"#,
            items.concat()
        )
    }

    #[test]
    fn test_extracts_one_record_per_post() {
        let items: Vec<String> = (100..120).map(entry_item).collect();
        let entries = extract_entries(&page(&items), &base());

        assert_eq!(entries.len(), 20);
        for (entry, id) in entries.iter().zip(100..120) {
            assert_eq!(entry.entry_id, id.to_string());
            assert_eq!(entry.content, format!("entry {id}"));
        }
    }

    #[test]
    fn test_extracts_all_fields() {
        let html = page(&[r#"
            <li data-id="1" data-author="ssg">
              <div class="content">
                pena'nın hakkını vermek lazım. (bkz: <a class="b" href="/?q=pena">pena</a>)<br/>
                ikinci   satır
              </div>
              <footer><div class="entry-footer-bottom"><div class="footer-info">
                <div id="entry-author"><a class="entry-author" href="/biri/ssg">ssg</a></div>
                <a class="entry-date permalink" href="/entry/1">15.02.1999 10:00 ~ 10:05</a>
              </div></div></footer>
            </li>"#
            .to_string()]);

        let entries = extract_entries(&html, &base());
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.entry_id, "1");
        assert_eq!(entry.author, "ssg");
        assert_eq!(entry.author_url, "https://eksisozluk.com/biri/ssg");
        assert_eq!(entry.date, "15.02.1999 10:00 ~ 10:05");
        assert_eq!(entry.permalink, "https://eksisozluk.com/entry/1");
        assert_eq!(
            entry.content,
            "pena'nın hakkını vermek lazım. (bkz: pena)\nikinci satır"
        );
    }

    #[test]
    fn test_nested_blocks_become_separate_lines() {
        let html = page(&[r#"
            <li data-id="5">
              <div class="content">ilk<div>ikinci</div><p>üçüncü</p><blockquote>alıntı
                <ul><li>madde bir</li><li>madde <b>iki</b></li></ul></blockquote>son (bkz: <a href="/?q=x">x</a>)</div>
            </li>"#
            .to_string()]);

        let entries = extract_entries(&html, &base());
        assert_eq!(
            entries[0].content,
            "ilk\nikinci\nüçüncü\nalıntı\nmadde bir\nmadde iki\nson (bkz: x)"
        );
    }

    #[test]
    fn test_missing_author_keeps_record() {
        let html = page(&[r#"
            <li data-id="42">
              <div class="content">yazarsız entry</div>
              <a class="entry-date" href="/entry/42">03.04.2021 09:15</a>
            </li>"#
            .to_string()]);

        let entries = extract_entries(&html, &base());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_id, "42");
        assert_eq!(entries[0].author, "");
        assert_eq!(entries[0].author_url, "");
        assert_eq!(entries[0].date, "03.04.2021 09:15");
        assert_eq!(entries[0].permalink, "https://eksisozluk.com/entry/42");
        assert_eq!(entries[0].content, "yazarsız entry");
    }

    #[test]
    fn test_missing_identifier_skips_post() {
        let html = page(&[
            entry_item(1),
            r#"<li data-id="  "><div class="content">no id</div></li>"#.to_string(),
            entry_item(2),
        ]);

        let entries = extract_entries(&html, &base());
        let ids: Vec<_> = entries.iter().map(|e| e.entry_id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn test_missing_body_and_date_default_to_empty() {
        let html = page(&[
            r#"<li data-id="7"><a class="entry-author" href="/biri/x">x</a></li>"#.to_string(),
        ]);

        let entries = extract_entries(&html, &base());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "");
        assert_eq!(entries[0].date, "");
        assert_eq!(entries[0].permalink, "https://eksisozluk.com/entry/7");
        assert_eq!(entries[0].author, "x");
    }

    #[test]
    fn test_urls_derived_when_links_have_no_href() {
        let html = page(&[r#"
            <li data-id="9">
              <div class="content">body</div>
              <a class="entry-author">uzun nick adı</a>
              <a class="entry-date">05.06.2022 18:00</a>
            </li>"#
            .to_string()]);

        let entries = extract_entries(&html, &base());
        assert_eq!(entries[0].author, "uzun nick adı");
        assert_eq!(
            entries[0].author_url,
            "https://eksisozluk.com/biri/uzun-nick-ad%C4%B1"
        );
        assert_eq!(entries[0].permalink, "https://eksisozluk.com/entry/9");
    }

    #[test]
    fn test_absolute_hrefs_are_kept() {
        let html = page(&[r#"
            <li data-id="3">
              <a class="entry-author" href="https://mirror.example/biri/abc">abc</a>
              <a class="entry-date" href="https://mirror.example/entry/3">01.01.2001 00:00</a>
            </li>"#
            .to_string()]);

        let entries = extract_entries(&html, &base());
        assert_eq!(entries[0].author_url, "https://mirror.example/biri/abc");
        assert_eq!(entries[0].permalink, "https://mirror.example/entry/3");
    }

    #[test]
    fn test_fallback_selectors() {
        let html = r#"<html><body><ul>
            <li class="topic-stream-item">
              <div class="entry-content">fallback body</div>
              <a data-author="true" href="/biri/eski">eski</a>
              <a class="permalink" href="/entry/555?ref=stream">07.08.2009 11:11</a>
            </li>
            <li class="topic-stream-item"><div class="entry-content">no link, no id</div></li>
        </ul></body></html>"#;

        let entries = extract_entries(html, &base());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_id, "555");
        assert_eq!(entries[0].content, "fallback body");
        assert_eq!(entries[0].author, "eski");
        assert_eq!(entries[0].date, "07.08.2009 11:11");
        assert_eq!(
            entries[0].permalink,
            "https://eksisozluk.com/entry/555?ref=stream"
        );
    }

    #[test]
    fn test_page_without_entries() {
        let entries = extract_entries("<html><body><p>boş</p></body></html>", &base());
        assert!(entries.is_empty());
    }
}
