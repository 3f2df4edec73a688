use botanica_core::catalog::Catalog;
use serde::Serialize;

use super::{load_catalog, to_json, CommandResult};

#[derive(Debug, Serialize)]
struct CatalogEntry<'a> {
    id: u32,
    name: &'a str,
    price: &'a str,
    original_price: &'a str,
    rating: f64,
    reviews: u32,
    in_stock: bool,
    tags: &'a [String],
}

#[derive(Debug, Serialize)]
struct CatalogListing<'a> {
    command: &'static str,
    count: usize,
    products: Vec<CatalogEntry<'a>>,
}

pub fn run(json_output: bool) -> CommandResult {
    let (_, catalog) = match load_catalog("catalog") {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    if json_output {
        let listing = CatalogListing {
            command: "catalog",
            count: catalog.len(),
            products: entries(&catalog),
        };
        return to_json("catalog", &listing);
    }

    CommandResult::rendered(render_table(&catalog))
}

fn entries(catalog: &Catalog) -> Vec<CatalogEntry<'_>> {
    catalog
        .products()
        .iter()
        .map(|product| CatalogEntry {
            id: product.id.0,
            name: &product.name,
            price: &product.price,
            original_price: &product.original_price,
            rating: product.rating,
            reviews: product.reviews,
            in_stock: product.in_stock,
            tags: &product.tags,
        })
        .collect()
}

fn render_table(catalog: &Catalog) -> String {
    let mut lines = vec![format!("catalog: {} products", catalog.len())];
    for product in catalog.products() {
        let stock = if product.in_stock { "in stock" } else { "out of stock" };
        lines.push(format!(
            "{:>3}  {:<28} {:>8}  {:.1} ({} reviews)  {stock}",
            product.id.0, product.name, product.price, product.rating, product.reviews
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use botanica_core::catalog::Catalog;

    use super::render_table;

    #[test]
    fn table_lists_every_product_with_stock_state() {
        let table = render_table(&Catalog::sample());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "catalog: 6 products");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].contains("Tranquil Evening Blend"));
        let stress = lines.iter().find(|line| line.contains("Stress Relief Blend"));
        assert!(stress.is_some_and(|line| line.ends_with("out of stock")));
    }
}
